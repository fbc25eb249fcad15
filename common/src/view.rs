//! 表示状態（中心座標・ズーム）
//!
//! ズームは見た目だけのもので、クリック投影の縮尺には影響しない。

use crate::geo::{MapPoint, DEFAULT_CENTER};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl FromStr for ZoomDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" | "+" => Ok(ZoomDirection::In),
            "out" | "-" => Ok(ZoomDirection::Out),
            _ => Err(format!("Unknown zoom direction: {}. Use in or out", s)),
        }
    }
}

/// 表示状態。デシリアライズ時もズームを [1, 18] に丸める。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewState")]
pub struct ViewState {
    pub center: MapPoint,
    pub zoom: u8,
}

#[derive(Deserialize)]
struct RawViewState {
    center: MapPoint,
    zoom: u8,
}

impl From<RawViewState> for ViewState {
    fn from(raw: RawViewState) -> Self {
        ViewState::new(raw.center, raw.zoom)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewState {
    /// ズーム値は [1, 18] に丸める
    pub fn new(center: MapPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn zoomed(self, direction: ZoomDirection) -> Self {
        let zoom = match direction {
            ZoomDirection::In => self.zoom.saturating_add(1).min(MAX_ZOOM),
            ZoomDirection::Out => self.zoom.saturating_sub(1).max(MIN_ZOOM),
        };
        Self { zoom, ..self }
    }

    pub fn zoom(&mut self, direction: ZoomDirection) -> u8 {
        *self = self.zoomed(direction);
        self.zoom
    }

    pub fn recentered(self, center: MapPoint) -> Self {
        Self { center, ..self }
    }
}
