use report_map_common::{MapPoint, MapWidget, MarkerReport, Viewport};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppState {
    pub widget: MapWidget,
    pub selected_report: Option<MarkerReport>,
    pub picked: Option<MapPoint>,
    pub source_path: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            widget: MapWidget::new(Viewport::DEFAULT),
            selected_report: None,
            picked: None,
            source_path: None,
        }
    }
}
