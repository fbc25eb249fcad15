//! 疑似地図ウィジェット
//!
//! 埋め込み側のページが所有するインスタンス。表示状態・通報・配置結果・
//! 選択地点を保持し、クリックをイベントへ変換する。
//!
//! イベント（`MapEvent`）は戻り値として返すだけで、コールバックの呼び出しは
//! 埋め込み側が行う。選択地点の設定・解除も埋め込み側の責任。

use crate::error::Result;
use crate::geo::{project_click_to_coordinate, MapPoint, Viewport};
use crate::layout::{layout_markers, JitterSource, MarkerPlacement};
use crate::locate::{GeoLocator, LocateResult, LocationUnavailable};
use crate::style::{legend_rect, legend_entries, select_hint_rect, MARKER_DIAMETER_PX};
use crate::types::MarkerReport;
use crate::view::{ViewState, ZoomDirection};

/// 背景クリックの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// 背景クリックは無視（マーカーのみ反応）
    #[default]
    Browse,
    /// 背景クリックで地点を選択
    SelectLocation,
}

/// 埋め込み側へ通知するイベント
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    MarkerSelected(MarkerReport),
    LocationPicked(MapPoint),
}

/// 現在地への移動結果
#[derive(Debug, Clone, PartialEq)]
pub struct Recentered {
    pub center: MapPoint,
    /// 地点選択モードのときのみ `LocationPicked`
    pub event: Option<MapEvent>,
}

#[derive(Debug, Clone)]
pub struct MapWidget {
    view: ViewState,
    viewport: Viewport,
    mode: InteractionMode,
    reports: Vec<MarkerReport>,
    placements: Vec<MarkerPlacement>,
    selected_point: Option<MapPoint>,
}

impl MapWidget {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            view: ViewState::default(),
            viewport,
            mode: InteractionMode::default(),
            reports: Vec::new(),
            placements: Vec::new(),
            selected_point: None,
        }
    }

    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    pub fn with_mode(mut self, mode: InteractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn reports(&self) -> &[MarkerReport] {
        &self.reports
    }

    pub fn placements(&self) -> &[MarkerPlacement] {
        &self.placements
    }

    pub fn selected_point(&self) -> Option<MapPoint> {
        self.selected_point
    }

    /// 描画対象のマーカー（入力順＝描画順）
    pub fn markers(&self) -> impl Iterator<Item = (&MarkerReport, &MarkerPlacement)> + '_ {
        self.placements
            .iter()
            .filter_map(|p| self.reports.get(p.slot).map(|r| (r, p)))
    }

    /// 通報を差し替えて再配置する。描画されたマーカー数を返す。
    ///
    /// 以前の配置はすべて破棄してから配置し直す。
    pub fn set_reports(&mut self, reports: Vec<MarkerReport>, jitter: &mut dyn JitterSource) -> usize {
        self.placements.clear();
        self.reports.clear();

        let placements: Vec<MarkerPlacement> = layout_markers(&reports, self.viewport, jitter)
            .into_iter()
            .map(|marker| marker.placement)
            .collect();

        tracing::debug!(
            total = reports.len(),
            rendered = placements.len(),
            "通報を再配置"
        );

        self.reports = reports;
        self.placements = placements;
        self.placements.len()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn set_selected_point(&mut self, point: Option<MapPoint>) {
        self.selected_point = point;
    }

    /// ビューポートサイズ変更（配置は百分率なので再配置しない）
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.viewport = Viewport::new(width, height)?;
        Ok(())
    }

    /// クリック位置にあるマーカー（重なりは後から描画されたものを優先）
    pub fn marker_at(&self, x: f64, y: f64) -> Option<&MarkerReport> {
        let radius = MARKER_DIAMETER_PX / 2.0;
        self.placements.iter().rev().find_map(|placement| {
            let (cx, cy) = placement.position.to_pixels(self.viewport);
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                self.reports.get(placement.slot)
            } else {
                None
            }
        })
    }

    /// 凡例・案内文の上かどうか（マーカーより下、背景より上に重なる）
    pub fn overlay_at(&self, x: f64, y: f64) -> bool {
        if legend_rect(legend_entries().len()).contains(x, y) {
            return true;
        }
        self.mode == InteractionMode::SelectLocation
            && select_hint_rect(self.viewport).contains(x, y)
    }

    /// クリックをイベントへ変換する
    ///
    /// マーカーに当たったクリックは背景へ伝播させない（座標投影しない）。
    /// 凡例・案内文の上のクリックは何も起こさない。
    pub fn handle_click(&self, x: f64, y: f64) -> Option<MapEvent> {
        if let Some(report) = self.marker_at(x, y) {
            return Some(MapEvent::MarkerSelected(report.clone()));
        }
        if self.overlay_at(x, y) {
            tracing::trace!(x, y, "凡例・案内文上のクリックを無視");
            return None;
        }

        match self.mode {
            InteractionMode::SelectLocation => Some(MapEvent::LocationPicked(
                project_click_to_coordinate(x, y, self.viewport, self.view.center),
            )),
            InteractionMode::Browse => None,
        }
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> u8 {
        self.view.zoom(direction)
    }

    /// 現在地取得の結果を反映する
    ///
    /// 失敗時は中心を変更しない（再試行は利用者の操作に任せる）。
    pub fn apply_location_fix(&mut self, fix: LocateResult) -> std::result::Result<Recentered, LocationUnavailable> {
        match fix {
            Ok(point) => {
                self.view = self.view.recentered(point);
                let event = match self.mode {
                    InteractionMode::SelectLocation => Some(MapEvent::LocationPicked(point)),
                    InteractionMode::Browse => None,
                };
                Ok(Recentered { center: point, event })
            }
            Err(reason) => {
                tracing::warn!(%reason, "現在地を取得できません");
                Err(reason)
            }
        }
    }

    pub async fn recenter_to_current_location(
        &mut self,
        locator: &dyn GeoLocator,
    ) -> std::result::Result<Recentered, LocationUnavailable> {
        let fix = locator.current_position().await;
        self.apply_location_fix(fix)
    }
}
