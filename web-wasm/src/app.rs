//! メインアプリケーションコンポーネント

use crate::components::{
    header::Header,
    interactive_map::InteractiveMap,
    map_controls::MapControls,
    report_details::ReportDetails,
};
use crate::geolocation::BrowserLocator;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use report_map_common::{
    GeoLocator, InteractionMode, MapEvent, MapPoint, MapWidget, MarkerReport, ThreadJitter, Viewport,
    ZoomDirection,
};
use web_sys::console;

/// お知らせの表示時間(ms)
const TOAST_MS: u32 = 4000;

/// デモ用の通報（リヤド周辺）
const DEMO_REPORTS: &str = r#"[
  {"id": 1, "lat": 24.7136, "lng": 46.6753, "type": "حفرة في الطريق", "status": "pending",
   "description": "حفرة كبيرة في شارع الملك فهد", "createdAt": "2024-07-08T00:00:00Z"},
  {"id": 2, "lat": 24.7186, "lng": 46.6803, "type": "إضاءة معطلة", "status": "in-progress",
   "description": "عمود الإضاءة لا يعمل", "createdAt": "2024-07-07T00:00:00Z"},
  {"id": 3, "lat": 24.7086, "lng": 46.6703, "type": "رصيف مكسور", "status": "completed",
   "description": "كسر في الرصيف يعيق المشاة", "createdAt": "2024-07-06T00:00:00Z"}
]"#;

fn demo_reports() -> Vec<MarkerReport> {
    serde_json::from_str(DEMO_REPORTS).unwrap_or_else(|e| {
        console::error_1(&format!("デモデータの読み込みに失敗: {}", e).into());
        Vec::new()
    })
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let widget = RwSignal::new(MapWidget::new(Viewport::DEFAULT));
    widget.update(|w| {
        w.set_reports(demo_reports(), &mut ThreadJitter);
    });

    let (selected_report, set_selected_report) = signal(None::<MarkerReport>);
    let (picked, set_picked) = signal(None::<MapPoint>);
    let (locating, set_locating) = signal(false);
    let (toast, set_toast) = signal(None::<String>);

    let select_mode = move || widget.with(|w| w.mode() == InteractionMode::SelectLocation);
    let zoom = Signal::derive(move || widget.with(|w| w.view().zoom));

    let on_marker_selected = move |report: MarkerReport| {
        set_selected_report.set(Some(report));
    };

    // 選択地点の設定は埋め込み側の責任
    let on_location_picked = move |point: MapPoint| {
        widget.update(|w| w.set_selected_point(Some(point)));
        set_picked.set(Some(point));
    };

    let on_toggle_mode = move |_| {
        widget.update(|w| {
            let mode = match w.mode() {
                InteractionMode::Browse => InteractionMode::SelectLocation,
                InteractionMode::SelectLocation => {
                    w.set_selected_point(None);
                    InteractionMode::Browse
                }
            };
            w.set_mode(mode);
        });
        set_picked.set(None);
    };

    let on_zoom = move |direction: ZoomDirection| {
        widget.update(|w| {
            w.zoom(direction);
        });
    };

    let show_toast = move |message: String| {
        set_toast.set(Some(message));
        Timeout::new(TOAST_MS, move || set_toast.set(None)).forget();
    };

    let on_locate = move |_| {
        set_locating.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let fix = BrowserLocator::default().current_position().await;

            // 取得中もウィジェットは操作されうるので、結果だけを最新の状態へ反映する
            let mut applied = None;
            widget.update(|w| applied = Some(w.apply_location_fix(fix)));

            match applied {
                Some(Ok(recentered)) => {
                    if let Some(MapEvent::LocationPicked(point)) = recentered.event {
                        on_location_picked(point);
                    }
                }
                Some(Err(reason)) => {
                    console::warn_1(&format!("現在地を取得できません: {}", reason).into());
                    show_toast("تعذر تحديد موقعك الحالي".to_string());
                }
                None => {}
            }
            set_locating.set(false);
        });
    };

    view! {
        <div class="container">
            <Header />

            <div class="map-toolbar" dir="rtl">
                <button class="btn btn-secondary" on:click=on_toggle_mode>
                    {move || if select_mode() { "إلغاء تحديد الموقع" } else { "تحديد موقع المشكلة" }}
                </button>
                <Show when=move || picked.get().is_some()>
                    <p class="picked-location">
                        {move || {
                            picked
                                .get()
                                .map(|p| format!("الموقع المحدد: {:.6}, {:.6}", p.latitude, p.longitude))
                        }}
                    </p>
                </Show>
            </div>

            <div class="map-wrapper">
                <InteractiveMap
                    widget=widget
                    on_marker_selected=on_marker_selected
                    on_location_picked=on_location_picked
                />

                <MapControls
                    zoom=zoom
                    locating=locating
                    on_zoom=on_zoom
                    on_locate=on_locate
                />

                {move || {
                    selected_report
                        .get()
                        .map(|report| {
                            view! {
                                <ReportDetails
                                    report=report
                                    on_close=move |_| set_selected_report.set(None)
                                />
                            }
                        })
                }}
            </div>

            <Show when=move || toast.get().is_some()>
                <div class="toast" dir="rtl">{move || toast.get()}</div>
            </Show>
        </div>
    }
}
