//! ズーム・現在地ボタン

use leptos::prelude::*;
use report_map_common::view::{MAX_ZOOM, MIN_ZOOM};
use report_map_common::ZoomDirection;

#[component]
pub fn MapControls<FZ, FL>(
    zoom: Signal<u8>,
    locating: ReadSignal<bool>,
    on_zoom: FZ,
    on_locate: FL,
) -> impl IntoView
where
    FZ: Fn(ZoomDirection) + 'static + Clone,
    FL: Fn(()) + 'static + Clone,
{
    view! {
        <div class="map-controls">
            <button
                class="btn btn-icon"
                title="تكبير"
                disabled={move || zoom.get() >= MAX_ZOOM}
                on:click={
                    let on_zoom = on_zoom.clone();
                    move |_| on_zoom(ZoomDirection::In)
                }
            >
                "+"
            </button>
            <button
                class="btn btn-icon"
                title="تصغير"
                disabled=move || zoom.get() <= MIN_ZOOM
                on:click={
                    let on_zoom = on_zoom.clone();
                    move |_| on_zoom(ZoomDirection::Out)
                }
            >
                "−"
            </button>
            <button
                class="btn btn-icon"
                title="موقعي الحالي"
                disabled=move || locating.get()
                on:click={
                    let on_locate = on_locate.clone();
                    move |_| on_locate(())
                }
            >
                {move || if locating.get() { "…" } else { "📍" }}
            </button>
            <span class="zoom-level">{move || zoom.get()}</span>
        </div>
    }
}
