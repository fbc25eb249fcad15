use report_map_common::LocationUnavailable;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("通報データが見つかりません: {0}")]
    NoReportsFound(String),

    #[error("引数が不正: {0}")]
    InvalidArgument(String),

    #[error("通報データの読み込みに失敗 ({path}): {source}")]
    ReportParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("現在地を取得できません: {0}。`report-map config --set-location LAT,LNG` または REPORT_MAP_LOCATION で設定してください")]
    Location(#[from] LocationUnavailable),

    #[error(transparent)]
    Core(#[from] report_map_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportMapError>;
