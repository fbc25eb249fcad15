//! 描画コマンド生成
//!
//! ウィジェットの状態から描画コマンド列を作る純粋関数。実際の描画
//! （DOM、egui、SVGなど）と差分適用は埋め込み側が行う。
//! コマンド列は必ず `Clear` から始まり、前回の描画を残さない。

use crate::geo::ScreenPosition;
use crate::style::{
    legend_entries, status_color, LegendEntry, Rgb, GRID_SPACING_PX, MARKER_DIAMETER_PX,
    SELECTED_DIAMETER_PX,
};
use crate::widget::{InteractionMode, MapWidget};
use serde::{Deserialize, Serialize};

/// 地点選択モードの案内文
pub const SELECT_HINT_TEXT: &str = "انقر على الخريطة لتحديد موقع المشكلة";

/// 道路風の補助線の位置（ビューポートに対する割合）
pub const STREET_LINE_FRACTIONS: [f64; 3] = [0.25, 0.5, 0.75];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// 既存の描画要素・リスナーをすべて破棄
    Clear,
    Background {
        grid_spacing_px: f64,
    },
    StreetLine {
        axis: Axis,
        fraction: f64,
    },
    Marker {
        report_id: String,
        /// ホバー時のツールチップ（通報の種類）
        label: String,
        x_percent: f64,
        y_percent: f64,
        diameter_px: f64,
        fill: Rgb,
    },
    SelectedLocation {
        x_percent: f64,
        y_percent: f64,
        diameter_px: f64,
        fill: Rgb,
    },
    Legend {
        entries: Vec<LegendEntry>,
    },
    SelectHint {
        text: String,
    },
}

pub fn render(widget: &MapWidget) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::Clear,
        DrawCommand::Background {
            grid_spacing_px: GRID_SPACING_PX,
        },
    ];

    for axis in [Axis::Horizontal, Axis::Vertical] {
        for fraction in STREET_LINE_FRACTIONS {
            commands.push(DrawCommand::StreetLine { axis, fraction });
        }
    }

    for (report, placement) in widget.markers() {
        commands.push(DrawCommand::Marker {
            report_id: report.id.clone(),
            label: report.category.clone(),
            x_percent: placement.position.x_percent,
            y_percent: placement.position.y_percent,
            diameter_px: MARKER_DIAMETER_PX,
            fill: status_color(&report.status),
        });
    }

    // 選択地点は座標にかかわらず中央に描く
    if widget.selected_point().is_some() {
        commands.push(DrawCommand::SelectedLocation {
            x_percent: ScreenPosition::CENTER.x_percent,
            y_percent: ScreenPosition::CENTER.y_percent,
            diameter_px: SELECTED_DIAMETER_PX,
            fill: Rgb::RED,
        });
    }

    commands.push(DrawCommand::Legend {
        entries: legend_entries(),
    });

    if widget.mode() == InteractionMode::SelectLocation {
        commands.push(DrawCommand::SelectHint {
            text: SELECT_HINT_TEXT.to_string(),
        });
    }

    commands
}
