//! 疑似地図コンポーネント
//!
//! `render` の描画コマンドを絶対配置のDOMとして描く。コマンド列が変わると
//! 子要素はまとめて作り直されるので、`Clear` は子要素の差し替えで実現される。

use super::legend::Legend;
use leptos::prelude::*;
use report_map_common::geo::PixelRect;
use report_map_common::style::{legend_rect, select_hint_rect};
use report_map_common::{
    render, Axis, DrawCommand, InteractionMode, MapEvent, MapPoint, MapWidget, MarkerReport, Rgb,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

#[component]
pub fn InteractiveMap<FM, FL>(
    widget: RwSignal<MapWidget>,
    on_marker_selected: FM,
    on_location_picked: FL,
) -> impl IntoView
where
    FM: Fn(MarkerReport) + 'static + Clone + Send + Sync,
    FL: Fn(MapPoint) + 'static + Clone + Send + Sync,
{
    let commands = Memo::new(move |_| widget.with(render));

    let on_background_click = {
        let on_marker_selected = on_marker_selected.clone();
        move |ev: MouseEvent| {
            let Some(rect) = ev
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| element.get_bounding_client_rect())
            else {
                return;
            };

            // 実際の表示サイズに合わせてから判定する（配置は百分率なので動かない）
            widget.update(|w| {
                let _ = w.resize(rect.width(), rect.height());
            });

            let x = ev.client_x() as f64 - rect.left();
            let y = ev.client_y() as f64 - rect.top();
            match widget.with_untracked(|w| w.handle_click(x, y)) {
                Some(MapEvent::LocationPicked(point)) => on_location_picked(point),
                Some(MapEvent::MarkerSelected(report)) => on_marker_selected(report),
                None => {}
            }
        }
    };

    view! {
        <div
            class=move || {
                if widget.with(|w| w.mode() == InteractionMode::SelectLocation) {
                    "map-container selecting"
                } else {
                    "map-container"
                }
            }
            on:click=on_background_click
        >
            {move || {
                commands
                    .get()
                    .into_iter()
                    .map(|command| draw(command, widget, on_marker_selected.clone()))
                    .collect_view()
            }}
        </div>
    }
}

fn draw<FM>(command: DrawCommand, widget: RwSignal<MapWidget>, on_marker_selected: FM) -> AnyView
where
    FM: Fn(MarkerReport) + 'static + Clone + Send + Sync,
{
    match command {
        DrawCommand::Clear => ().into_any(),
        DrawCommand::Background { grid_spacing_px } => {
            let style = format!(
                "position: absolute; inset: 0; \
                 background-image: linear-gradient(rgba(0,0,0,0.05) 1px, transparent 1px), \
                 linear-gradient(90deg, rgba(0,0,0,0.05) 1px, transparent 1px); \
                 background-size: {0}px {0}px;",
                grid_spacing_px
            );
            view! { <div class="map-grid" style=style /> }.into_any()
        }
        DrawCommand::StreetLine { axis, fraction } => {
            let style = match axis {
                Axis::Horizontal => format!(
                    "position: absolute; left: 0; right: 0; top: {}%; height: 2px;",
                    fraction * 100.0
                ),
                Axis::Vertical => format!(
                    "position: absolute; top: 0; bottom: 0; left: {}%; width: 2px;",
                    fraction * 100.0
                ),
            };
            view! { <div class="street-line" style=style /> }.into_any()
        }
        DrawCommand::Marker { report_id, label, x_percent, y_percent, diameter_px, fill } => {
            let on_click = move |ev: MouseEvent| {
                // 背景のクリック処理（座標投影）へ伝播させない
                ev.stop_propagation();
                let report = widget.with_untracked(|w| {
                    w.reports().iter().find(|r| r.id == report_id).cloned()
                });
                if let Some(report) = report {
                    on_marker_selected(report);
                }
            };
            view! {
                <div
                    class="map-marker"
                    title=label
                    style=circle_style(x_percent, y_percent, diameter_px, fill, 2.0)
                    on:click=on_click
                >
                    <div class="marker-dot" />
                </div>
            }
            .into_any()
        }
        DrawCommand::SelectedLocation { x_percent, y_percent, diameter_px, fill } => view! {
            <div
                class="selected-location"
                style=circle_style(x_percent, y_percent, diameter_px, fill, 3.0)
            >
                <div class="marker-dot" />
            </div>
        }
        .into_any(),
        // 凡例・案内文は背景の上に重なるだけで、クリックを背景へ渡さない
        DrawCommand::Legend { entries } => {
            let style = overlay_style(legend_rect(entries.len()));
            view! {
                <div class="map-legend-box" style=style on:click=|ev: MouseEvent| ev.stop_propagation()>
                    <Legend entries=entries />
                </div>
            }
            .into_any()
        }
        DrawCommand::SelectHint { text } => {
            let style = overlay_style(select_hint_rect(widget.with_untracked(|w| w.viewport())));
            view! {
                <div
                    class="select-hint"
                    dir="rtl"
                    style=style
                    on:click=|ev: MouseEvent| ev.stop_propagation()
                >
                    <p>{text}</p>
                </div>
            }
            .into_any()
        }
    }
}

fn overlay_style(rect: PixelRect) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; box-sizing: border-box;",
        rect.x, rect.y, rect.width, rect.height
    )
}

fn circle_style(x_percent: f64, y_percent: f64, diameter_px: f64, fill: Rgb, border_px: f64) -> String {
    format!(
        "position: absolute; left: {x_percent}%; top: {y_percent}%; \
         width: {diameter_px}px; height: {diameter_px}px; transform: translate(-50%, -50%); \
         border-radius: 50%; background-color: {}; border: {border_px}px solid {};",
        fill.hex(),
        Rgb::WHITE.hex(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_map_common::Viewport;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_overlay_style_matches_click_exclusion() {
        let legend = overlay_style(legend_rect(3));
        assert!(legend.contains("left: 16px; top: 16px; width: 160px; height: 96px;"));

        let viewport = Viewport::new(400.0, 300.0).unwrap();
        let hint = overlay_style(select_hint_rect(viewport));
        assert!(hint.contains("left: 16px; top: 252px; width: 368px; height: 32px;"));
    }

    #[wasm_bindgen_test]
    fn test_overlay_click_is_not_a_pick() {
        let viewport = Viewport::new(400.0, 300.0).unwrap();
        let widget = MapWidget::new(viewport).with_mode(InteractionMode::SelectLocation);
        let hint = select_hint_rect(viewport);

        assert_eq!(widget.handle_click(100.0, 50.0), None);
        assert_eq!(widget.handle_click(200.0, hint.y + 1.0), None);
        assert!(matches!(widget.handle_click(200.0, 150.0), Some(MapEvent::LocationPicked(_))));
    }
}
