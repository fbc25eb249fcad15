use anyhow::{Context, Result};
use report_map_common::{MapPoint, MarkerReport};
use std::fs;
use std::path::Path;

/// 端末位置の上書き（CLIと同じ環境変数）
pub const LOCATION_ENV: &str = "REPORT_MAP_LOCATION";

pub fn load_reports(path: &Path) -> Result<Vec<MarkerReport>> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let reports: Vec<MarkerReport> = serde_json::from_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(reports)
}

/// `REPORT_MAP_LOCATION` の現在地（未設定なら None）
pub fn device_location() -> Result<Option<MapPoint>> {
    match std::env::var(LOCATION_ENV) {
        Ok(value) if !value.trim().is_empty() => parse_location(&value).map(Some),
        _ => Ok(None),
    }
}

fn parse_location(value: &str) -> Result<MapPoint> {
    value
        .parse::<MapPoint>()
        .with_context(|| format!("{LOCATION_ENV}={value}"))
}
