//! JSON出力

use crate::error::Result;
use chrono::{DateTime, Utc};
use report_map_common::{DrawCommand, PlacedMarker, Viewport};
use serde::Serialize;

/// `layout` コマンドの1行
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub id: String,
    pub slot: usize,
    pub column: usize,
    pub row: usize,
    pub x_percent: f64,
    pub y_percent: f64,
    pub x_px: f64,
    pub y_px: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub generated_at: DateTime<Utc>,
    pub fingerprint: String,
    pub seed: Option<u64>,
    pub viewport: Viewport,
    pub total: usize,
    pub markers: Vec<LayoutEntry>,
}

pub fn layout_entries(placed: &[PlacedMarker<'_>], viewport: Viewport) -> Vec<LayoutEntry> {
    placed
        .iter()
        .map(|marker| {
            let (x_px, y_px) = marker.placement.position.to_pixels(viewport);
            LayoutEntry {
                id: marker.report.id.clone(),
                slot: marker.placement.slot,
                column: marker.placement.column(),
                row: marker.placement.row(),
                x_percent: marker.placement.position.x_percent,
                y_percent: marker.placement.position.y_percent,
                x_px,
                y_px,
            }
        })
        .collect()
}

pub fn layout_to_json(document: &LayoutDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn commands_to_json(commands: &[DrawCommand]) -> Result<String> {
    Ok(serde_json::to_string_pretty(commands)?)
}
