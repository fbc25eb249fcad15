//! 各コマンドの処理本体
//!
//! 表示（println）は main 側で行い、ここではデータを組み立てて返す。

use crate::cli::LayoutArgs;
use crate::config::Config;
use crate::error::{ReportMapError, Result};
use crate::export::json::{layout_entries, LayoutDocument};
use report_map_common::view::{MAX_ZOOM, MIN_ZOOM};
use report_map_common::{
    input_fingerprint, layout_markers, stable_seed, FixedLocator, InteractionMode, JitterSource,
    MapPoint, MapWidget, MarkerReport, Recentered, SeededJitter, ThreadJitter, ViewState,
    Viewport, ZoomDirection,
};

/// 描画時の設定
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub viewport: Viewport,
    pub view: ViewState,
    pub mode: InteractionMode,
    pub selected: Option<MapPoint>,
    pub seed: Option<u64>,
}

pub fn resolve_viewport(config: &Config, args: &LayoutArgs) -> Result<Viewport> {
    Ok(Viewport::new(
        args.width.unwrap_or(config.viewport_width),
        args.height.unwrap_or(config.viewport_height),
    )?)
}

/// シードの優先順位: --seed > --stable > 設定値 > なし（ランダム）
pub fn resolve_seed(config: &Config, args: &LayoutArgs, reports: &[MarkerReport]) -> Option<u64> {
    args.seed
        .or_else(|| args.stable.then(|| stable_seed(reports)))
        .or(config.layout_seed)
}

pub fn jitter_for(seed: Option<u64>) -> Box<dyn JitterSource> {
    match seed {
        Some(seed) => Box::new(SeededJitter::new(seed)),
        None => Box::new(ThreadJitter),
    }
}

pub fn layout_document(reports: &[MarkerReport], viewport: Viewport, seed: Option<u64>) -> LayoutDocument {
    let mut jitter = jitter_for(seed);
    let placed = layout_markers(reports, viewport, jitter.as_mut());

    LayoutDocument {
        generated_at: chrono::Utc::now(),
        fingerprint: input_fingerprint(reports),
        seed,
        viewport,
        total: reports.len(),
        markers: layout_entries(&placed, viewport),
    }
}

pub fn build_widget(reports: Vec<MarkerReport>, options: &RenderOptions) -> MapWidget {
    let mut widget = MapWidget::new(options.viewport)
        .with_view(options.view)
        .with_mode(options.mode);
    widget.set_selected_point(options.selected);

    let mut jitter = jitter_for(options.seed);
    widget.set_reports(reports, jitter.as_mut());
    widget
}

/// 引数で受け取ったズームの範囲チェック
pub fn checked_zoom(zoom: u8) -> Result<u8> {
    if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(ReportMapError::InvalidArgument(format!(
            "ズームは{}〜{}で指定してください: {}",
            MIN_ZOOM, MAX_ZOOM, zoom
        )))
    }
}

/// 開始値から `steps` 回ズームした各段階の値
pub fn zoom_sequence(start: u8, direction: ZoomDirection, steps: u32) -> Result<Vec<u8>> {
    let mut view = ViewState::new(report_map_common::DEFAULT_CENTER, checked_zoom(start)?);
    Ok((0..steps).map(|_| view.zoom(direction)).collect())
}

/// 設定・環境変数の現在地で地図中心を移動する
pub async fn locate(config: &Config, mode: InteractionMode) -> Result<(MapWidget, Recentered)> {
    let locator = FixedLocator::new(config.device_location()?);
    let mut widget = MapWidget::new(config.viewport()?)
        .with_view(config.initial_view())
        .with_mode(mode);

    let recentered = widget.recenter_to_current_location(&locator).await?;
    Ok((widget, recentered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_sequence_stops_at_bounds() {
        let steps = zoom_sequence(16, ZoomDirection::In, 4).unwrap();
        assert_eq!(steps, vec![17, 18, 18, 18]);

        let steps = zoom_sequence(2, ZoomDirection::Out, 3).unwrap();
        assert_eq!(steps, vec![1, 1, 1]);
    }

    #[test]
    fn test_checked_zoom_rejects_out_of_range() {
        assert!(checked_zoom(0).is_err());
        assert!(checked_zoom(19).is_err());
        assert_eq!(checked_zoom(12).unwrap(), 12);
    }

    #[test]
    fn test_resolve_seed_priority() {
        let mut config = Config::default();
        config.layout_seed = Some(3);
        let reports: Vec<MarkerReport> = serde_json::from_str(r#"[{"id":"a","type":"حفرة","status":"pending","createdAt":"2024-07-08T00:00:00Z"}]"#).unwrap();

        let args = LayoutArgs { seed: Some(9), ..Default::default() };
        assert_eq!(resolve_seed(&config, &args, &reports), Some(9));

        let args = LayoutArgs { stable: true, ..Default::default() };
        assert_eq!(resolve_seed(&config, &args, &reports), Some(stable_seed(&reports)));

        assert_eq!(resolve_seed(&config, &LayoutArgs::default(), &reports), Some(3));
    }

    #[test]
    fn test_build_widget_is_reproducible_with_seed() {
        let reports: Vec<MarkerReport> = serde_json::from_str(
            r#"[{"id":1,"latitude":24.71,"longitude":46.67,"type":"حفرة","status":"pending","createdAt":"2024-07-08T00:00:00Z"},
                {"id":2,"latitude":24.72,"longitude":46.68,"type":"إنارة","status":"completed","createdAt":"2024-07-09T00:00:00Z"}]"#,
        )
        .unwrap();
        let options = RenderOptions {
            viewport: Viewport::new(400.0, 300.0).unwrap(),
            view: ViewState::default(),
            mode: InteractionMode::Browse,
            selected: None,
            seed: Some(42),
        };

        let a = build_widget(reports.clone(), &options);
        let b = build_widget(reports, &options);
        assert_eq!(a.placements(), b.placements());
        assert_eq!(a.placements().len(), 2);
    }
}
