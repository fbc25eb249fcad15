//! 配色・マーカー寸法
//!
//! ステータス色は凡例とマーカーで共通。未知のステータスはグレー。

use crate::error::{Error, Result};
use crate::geo::{PixelRect, Viewport};
use crate::types::ReportStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// マーカー直径（px）
pub const MARKER_DIAMETER_PX: f64 = 24.0;

/// 選択地点マーカー直径（px）
pub const SELECTED_DIAMETER_PX: f64 = 32.0;

/// 背景グリッド間隔（px）
pub const GRID_SPACING_PX: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const AMBER: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
    pub const BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
    pub const GREEN: Rgb = Rgb::new(0x10, 0xb9, 0x81);
    pub const GRAY: Rgb = Rgb::new(0x6b, 0x72, 0x80);
    pub const RED: Rgb = Rgb::new(0xef, 0x44, 0x44);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::Config(format!("invalid color: {value}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::Config(format!("invalid color: {value}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.hex()
    }
}

/// ステータス → マーカー色
pub fn status_color(status: &ReportStatus) -> Rgb {
    match status {
        ReportStatus::Pending => Rgb::AMBER,
        ReportStatus::InProgress => Rgb::BLUE,
        ReportStatus::Completed => Rgb::GREEN,
        ReportStatus::Other(_) => Rgb::GRAY,
    }
}

/// 凡例の1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub status: ReportStatus,
    pub label: String,
    pub color: Rgb,
}

/// 凡例・案内文の地図端からの余白（px）
pub const OVERLAY_MARGIN_PX: f64 = 16.0;
pub const LEGEND_WIDTH_PX: f64 = 160.0;
/// 凡例の見出し部分の高さ（px）
pub const LEGEND_HEADER_PX: f64 = 36.0;
pub const LEGEND_ROW_PX: f64 = 20.0;
pub const SELECT_HINT_HEIGHT_PX: f64 = 32.0;

/// 凡例の表示領域（左上）
pub fn legend_rect(rows: usize) -> PixelRect {
    PixelRect::new(
        OVERLAY_MARGIN_PX,
        OVERLAY_MARGIN_PX,
        LEGEND_WIDTH_PX,
        LEGEND_HEADER_PX + LEGEND_ROW_PX * rows as f64,
    )
}

/// 地点選択の案内文の表示領域（下端、左右いっぱい）
pub fn select_hint_rect(viewport: Viewport) -> PixelRect {
    PixelRect::new(
        OVERLAY_MARGIN_PX,
        viewport.height - OVERLAY_MARGIN_PX - SELECT_HINT_HEIGHT_PX,
        (viewport.width - OVERLAY_MARGIN_PX * 2.0).max(0.0),
        SELECT_HINT_HEIGHT_PX,
    )
}

pub fn legend_entries() -> Vec<LegendEntry> {
    ReportStatus::KNOWN
        .iter()
        .map(|status| LegendEntry {
            status: status.clone(),
            label: status.label().to_string(),
            color: status_color(status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(&ReportStatus::Pending).hex(), "#f59e0b");
        assert_eq!(status_color(&ReportStatus::InProgress).hex(), "#3b82f6");
        assert_eq!(status_color(&ReportStatus::Completed).hex(), "#10b981");
    }

    #[test]
    fn test_unknown_status_is_gray() {
        let status = ReportStatus::parse("on-hold");
        assert_eq!(status_color(&status), Rgb::GRAY);
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(Rgb::from_hex("#ef4444").unwrap(), Rgb::RED);
        assert_eq!(Rgb::from_hex("10b981").unwrap(), Rgb::GREEN);
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_rgb_serializes_as_hex() {
        let json = serde_json::to_string(&Rgb::BLUE).unwrap();
        assert_eq!(json, "\"#3b82f6\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::BLUE);
    }

    #[test]
    fn test_overlay_rects() {
        assert_eq!(legend_rect(3), PixelRect::new(16.0, 16.0, 160.0, 96.0));

        let hint = select_hint_rect(Viewport::new(400.0, 300.0).unwrap());
        assert_eq!(hint, PixelRect::new(16.0, 252.0, 368.0, 32.0));
        assert_eq!(hint.bottom(), 284.0);

        let narrow = select_hint_rect(Viewport::new(20.0, 300.0).unwrap());
        assert_eq!(narrow.width, 0.0);
    }

    #[test]
    fn test_legend_order() {
        let legend = legend_entries();
        let statuses: Vec<_> = legend.iter().map(|e| e.status.clone()).collect();
        assert_eq!(statuses, ReportStatus::KNOWN.to_vec());
        assert_eq!(legend[0].color, Rgb::AMBER);
        assert_eq!(legend[2].label, "تم الإصلاح");
    }
}
