//! エラー型定義

use crate::locate::LocationUnavailable;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Location unavailable: {0}")]
    Location(#[from] LocationUnavailable),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_viewport() {
        let error = Error::InvalidViewport { width: 0.0, height: 300.0 };
        assert_eq!(format!("{}", error), "Invalid viewport: 0x300");
    }

    #[test]
    fn test_error_from_location() {
        let error: Error = LocationUnavailable::PermissionDenied.into();
        assert!(matches!(error, Error::Location(LocationUnavailable::PermissionDenied)));
        assert!(format!("{}", error).starts_with("Location unavailable"));
    }

    #[test]
    fn test_error_display_coordinate() {
        let error = "abc,46.6".parse::<crate::geo::MapPoint>().unwrap_err();
        assert_eq!(format!("{}", error), "Invalid coordinate: abc,46.6");
    }
}
