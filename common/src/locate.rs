//! 現在地取得の抽象
//!
//! 実際の取得（ブラウザのGeolocation API、設定値など）は埋め込み側が
//! `GeoLocator` として提供する。1回の呼び出しにつき1回だけ結果を返す。
//! タイムアウト・キャンセルは提供側の責任。

use crate::geo::MapPoint;
use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 現在地を取得できなかった理由
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationUnavailable {
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out")]
    Timeout,
}

impl LocationUnavailable {
    /// W3C GeolocationPositionError.code からの変換
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationUnavailable::PermissionDenied,
            3 => LocationUnavailable::Timeout,
            _ => LocationUnavailable::PositionUnavailable,
        }
    }
}

/// 取得オプション（報告フォームと同じ値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 60_000,
        }
    }
}

pub type LocateResult = Result<MapPoint, LocationUnavailable>;

pub trait GeoLocator {
    fn current_position(&self) -> LocalBoxFuture<'_, LocateResult>;
}

/// 固定の現在地を返す（設定ファイル・環境変数・テスト用）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedLocator {
    position: Option<MapPoint>,
}

impl FixedLocator {
    pub fn new(position: Option<MapPoint>) -> Self {
        Self { position }
    }

    pub fn at(position: MapPoint) -> Self {
        Self::new(Some(position))
    }

    pub fn unavailable() -> Self {
        Self::new(None)
    }
}

impl GeoLocator for FixedLocator {
    fn current_position(&self) -> LocalBoxFuture<'_, LocateResult> {
        future::ready(self.position.ok_or(LocationUnavailable::Unsupported)).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_fixed_locator_returns_point() {
        let point = MapPoint::new(21.4858, 39.1925);
        let result = block_on(FixedLocator::at(point).current_position());
        assert_eq!(result, Ok(point));
    }

    #[test]
    fn test_fixed_locator_unavailable() {
        let result = block_on(FixedLocator::unavailable().current_position());
        assert_eq!(result, Err(LocationUnavailable::Unsupported));
    }

    #[test]
    fn test_from_code() {
        assert_eq!(LocationUnavailable::from_code(1), LocationUnavailable::PermissionDenied);
        assert_eq!(LocationUnavailable::from_code(2), LocationUnavailable::PositionUnavailable);
        assert_eq!(LocationUnavailable::from_code(3), LocationUnavailable::Timeout);
        assert_eq!(LocationUnavailable::from_code(99), LocationUnavailable::PositionUnavailable);
    }

    #[test]
    fn test_default_options() {
        let options = LocateOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout_ms, 10_000);
        assert_eq!(options.maximum_age_ms, 60_000);
    }
}
