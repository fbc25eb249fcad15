//! Report Map Common Library
//!
//! 通報地図ウィジェットの中核。CLI・Web(WASM)・デスクトップで共有される
//! 型と計算（マーカー配置、クリック投影、表示状態、描画コマンド）。

pub mod error;
pub mod geo;
pub mod layout;
pub mod locate;
pub mod render;
pub mod style;
pub mod types;
pub mod view;
pub mod widget;

pub use error::{Error, Result};
pub use geo::{project_click_to_coordinate, MapPoint, ScreenPosition, Viewport, DEFAULT_CENTER};
pub use layout::{
    input_fingerprint, layout_markers, stable_seed, JitterSource, MarkerPlacement, PlacedMarker,
    SeededJitter, ThreadJitter,
};
pub use locate::{FixedLocator, GeoLocator, LocateOptions, LocateResult, LocationUnavailable};
pub use render::{render, Axis, DrawCommand};
pub use style::{legend_entries, status_color, LegendEntry, Rgb};
pub use types::{MarkerReport, ReportFilter, ReportStatus, StatusCounts};
pub use view::{ViewState, ZoomDirection};
pub use widget::{InteractionMode, MapEvent, MapWidget, Recentered};
