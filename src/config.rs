use crate::error::{ReportMapError, Result};
use report_map_common::view::DEFAULT_ZOOM;
use report_map_common::{MapPoint, ViewState, Viewport, DEFAULT_CENTER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 端末位置の上書き（"緯度,経度"）
pub const LOCATION_ENV: &str = "REPORT_MAP_LOCATION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_center: MapPoint,
    pub default_zoom: u8,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// 現在地として扱う座標（未設定なら現在地取得は失敗する）
    pub device_location: Option<MapPoint>,
    /// マーカー揺らぎのシード（未設定なら毎回ランダム）
    pub layout_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            viewport_width: 400.0,
            viewport_height: 400.0,  // ウィジェット既定の高さ 400px
            device_location: None,
            layout_seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReportMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("report-map").join("config.json"))
    }

    pub fn initial_view(&self) -> ViewState {
        ViewState::new(self.default_center, self.default_zoom)
    }

    pub fn viewport(&self) -> Result<Viewport> {
        Ok(Viewport::new(self.viewport_width, self.viewport_height)?)
    }

    /// 現在地（環境変数を優先）
    pub fn device_location(&self) -> Result<Option<MapPoint>> {
        match std::env::var(LOCATION_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.parse()?)),
            _ => Ok(self.device_location),
        }
    }
}
