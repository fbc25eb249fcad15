//! 地図ウィジェットのシナリオテスト
//!
//! 埋め込み側（CLI）から見たウィジェットの振る舞いを検証

use report_map_common::style::{legend_rect, select_hint_rect};
use report_map_common::{
    legend_entries, render, DrawCommand, FixedLocator, InteractionMode, JitterSource, LocationUnavailable,
    MapEvent, MapPoint, MapWidget, MarkerReport, Rgb, ScreenPosition, ViewState, Viewport,
    ZoomDirection,
};

/// 揺らぎ0（格子の基準位置に置く）
struct NoJitter;

impl JitterSource for NoJitter {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

fn scenario_reports() -> Vec<MarkerReport> {
    serde_json::from_str(
        r#"[
          {"id": "a", "lat": 24.71, "lng": 46.67, "status": "pending", "createdAt": "2024-07-08T09:00:00Z"},
          {"id": "b", "lat": null, "lng": 46.68, "status": "completed", "createdAt": "2024-07-08T10:00:00Z"},
          {"id": "c", "lat": 24.72, "lng": 46.69, "status": "in-progress", "createdAt": "2024-07-08T11:00:00Z"}
        ]"#,
    )
    .expect("シナリオ入力の解析に失敗")
}

/// 座標のない通報は描画されないが列を1つ消費する
#[test]
fn test_skipped_report_consumes_column() {
    let mut widget = MapWidget::new(Viewport::new(400.0, 300.0).unwrap());
    let rendered = widget.set_reports(scenario_reports(), &mut NoJitter);
    assert_eq!(rendered, 2);

    let placed: Vec<(&str, usize, usize)> = widget
        .markers()
        .map(|(report, p)| (report.id.as_str(), p.row(), p.column()))
        .collect();
    assert_eq!(placed, vec![("a", 0, 0), ("c", 0, 2)]);

    let markers: Vec<(String, f64, Rgb)> = render(&widget)
        .into_iter()
        .filter_map(|c| match c {
            DrawCommand::Marker { report_id, x_percent, fill, .. } => Some((report_id, x_percent, fill)),
            _ => None,
        })
        .collect();
    assert_eq!(
        markers,
        vec![
            ("a".to_string(), 20.0, Rgb::AMBER),
            ("c".to_string(), 50.0, Rgb::BLUE),
        ]
    );
}

/// 地点選択モードでもマーカー上のクリックは座標投影しない
#[test]
fn test_marker_click_does_not_pick_location() {
    let viewport = Viewport::new(400.0, 300.0).unwrap();
    let mut widget = MapWidget::new(viewport).with_mode(InteractionMode::SelectLocation);
    widget.set_reports(scenario_reports(), &mut NoJitter);

    let (x, y) = ScreenPosition::new(50.0, 20.0).to_pixels(viewport);
    match widget.handle_click(x, y) {
        Some(MapEvent::MarkerSelected(report)) => assert_eq!(report.id, "c"),
        other => panic!("マーカー選択になっていない: {:?}", other),
    }

    // 背景なら投影される
    match widget.handle_click(200.0, 150.0) {
        Some(MapEvent::LocationPicked(point)) => assert_eq!(point, widget.view().center),
        other => panic!("地点選択になっていない: {:?}", other),
    }
}

/// 凡例・案内文の上のクリックは地点選択にならない
#[test]
fn test_overlay_click_does_not_pick_location() {
    let viewport = Viewport::new(400.0, 300.0).unwrap();
    let mut widget = MapWidget::new(viewport).with_mode(InteractionMode::SelectLocation);
    widget.set_reports(scenario_reports(), &mut NoJitter);

    let legend = legend_rect(legend_entries().len());
    assert_eq!(widget.handle_click(legend.x + 10.0, legend.y + 10.0), None);

    let hint = select_hint_rect(viewport);
    assert_eq!(widget.handle_click(200.0, hint.y + hint.height / 2.0), None);
    assert_eq!(widget.selected_point(), None);

    // 凡例の外（右上）は背景
    assert!(matches!(
        widget.handle_click(300.0, 50.0),
        Some(MapEvent::LocationPicked(_))
    ));
}

#[test]
fn test_zoom_is_clamped() {
    let mut widget = MapWidget::new(Viewport::new(400.0, 300.0).unwrap());
    for _ in 0..20 {
        assert!(widget.zoom(ZoomDirection::In) <= 18);
    }
    assert_eq!(widget.view().zoom, 18);

    for _ in 0..20 {
        assert!(widget.zoom(ZoomDirection::Out) >= 1);
    }
    assert_eq!(widget.view().zoom, 1);
}

#[tokio::test]
async fn test_recenter_failure_keeps_center() {
    let view = ViewState::new(MapPoint::new(21.0, 39.0), 12);
    let mut widget = MapWidget::new(Viewport::new(400.0, 300.0).unwrap()).with_view(view);

    let result = widget
        .recenter_to_current_location(&FixedLocator::unavailable())
        .await;
    assert_eq!(result.unwrap_err(), LocationUnavailable::Unsupported);
    assert_eq!(widget.view(), view);
}

#[tokio::test]
async fn test_recenter_in_select_mode_emits_pick() {
    let here = MapPoint::new(24.8, 46.7);
    let mut widget = MapWidget::new(Viewport::new(400.0, 300.0).unwrap())
        .with_mode(InteractionMode::SelectLocation);

    let recentered = widget
        .recenter_to_current_location(&FixedLocator::at(here))
        .await
        .expect("現在地の取得に失敗");
    assert_eq!(recentered.center, here);
    assert_eq!(recentered.event, Some(MapEvent::LocationPicked(here)));
    assert_eq!(widget.view().center, here);
}
