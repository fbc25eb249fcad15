//! 座標・ビューポート・クリック投影
//!
//! 実際の地図投影（Web Mercator等）は行わない。ビューポート全体を
//! 常に経緯度0.1度（中心から±0.05度）として線形に対応させる。
//! ズームレベルはこの縮尺に影響しない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 位置情報が得られない場合の地図中心（リヤド）
pub const DEFAULT_CENTER: MapPoint = MapPoint::new(24.7136, 46.6753);

/// ビューポート全体に対応する経緯度の幅（度）
pub const PROJECTION_SPAN_DEGREES: f64 = 0.1;

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl MapPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Default for MapPoint {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// `"24.7136,46.6753"` 形式をパース
impl FromStr for MapPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidCoordinate(s.to_string()))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinate(s.to_string()))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinate(s.to_string()))?;

        let point = MapPoint::new(latitude, longitude);
        if !point.is_valid() {
            return Err(Error::InvalidCoordinate(s.to_string()));
        }
        Ok(point)
    }
}

/// 描画領域のピクセルサイズ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Viewport {
    /// 埋め込み側がサイズを測る前の既定値（ウィジェットの既定の高さ 400px）
    pub const DEFAULT: Viewport = Viewport {
        width: 400.0,
        height: 400.0,
    };

    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !valid {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }
}

/// ビューポート左上原点の矩形（px）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// 境界上も含む
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x..=self.right()).contains(&x) && (self.y..=self.bottom()).contains(&y)
    }
}

/// ビューポートに対する百分率位置（マーカー中心）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPosition {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl ScreenPosition {
    pub const fn new(x_percent: f64, y_percent: f64) -> Self {
        Self { x_percent, y_percent }
    }

    /// ビューポート中央（選択地点マーカーの位置）
    pub const CENTER: ScreenPosition = ScreenPosition::new(50.0, 50.0);

    pub fn to_pixels(&self, viewport: Viewport) -> (f64, f64) {
        (
            viewport.width * self.x_percent / 100.0,
            viewport.height * self.y_percent / 100.0,
        )
    }
}

/// クリック位置（ビューポート左上原点のピクセル）を緯度経度へ変換
///
/// 中心クリックは `center` そのもの、左上隅は `(lat + 0.05, lng - 0.05)` になる。
pub fn project_click_to_coordinate(
    click_x: f64,
    click_y: f64,
    viewport: Viewport,
    center: MapPoint,
) -> MapPoint {
    let latitude = center.latitude
        + ((viewport.height / 2.0 - click_y) / viewport.height) * PROJECTION_SPAN_DEGREES;
    let longitude = center.longitude
        + ((click_x - viewport.width / 2.0) / viewport.width) * PROJECTION_SPAN_DEGREES;

    MapPoint::new(latitude, longitude)
}
