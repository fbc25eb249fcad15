//! 通報データの型定義
//!
//! ウィジェットに渡される通報（読み取り専用）と、そのステータス:
//! - MarkerReport: 地図上に1つのマーカーとして描画される通報
//! - ReportStatus: 既知の3状態＋未知の文字列（前方互換）
//! - StatusCounts / ReportFilter: ダッシュボードの集計・絞り込み

use crate::geo::MapPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 通報ステータス
///
/// 未知の文字列は `Other` として保持し、そのまま書き戻す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl ReportStatus {
    /// 既知のステータス（凡例の表示順）
    pub const KNOWN: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Completed,
    ];

    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "pending" => ReportStatus::Pending,
            "in-progress" => ReportStatus::InProgress,
            "completed" => ReportStatus::Completed,
            _ => ReportStatus::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Completed => "completed",
            ReportStatus::Other(value) => value.as_str(),
        }
    }

    /// 画面表示用ラベル（アラビア語）
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "قيد المراجعة",
            ReportStatus::InProgress => "قيد الإصلاح",
            ReportStatus::Completed => "تم الإصلاح",
            ReportStatus::Other(_) => "غير محدد",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Under review",
            ReportStatus::InProgress => "Being fixed",
            ReportStatus::Completed => "Fixed",
            ReportStatus::Other(_) => "Unknown",
        }
    }
}

impl From<String> for ReportStatus {
    fn from(value: String) -> Self {
        ReportStatus::parse(&value)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 地図に描画される通報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerReport {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 欠損（null・未設定・非有限値）のとき描画されない
    #[serde(default, alias = "location_lat", alias = "lat")]
    pub latitude: Option<f64>,

    #[serde(default, alias = "location_lng", alias = "lng")]
    pub longitude: Option<f64>,

    #[serde(default, alias = "type")]
    pub category: String,         // 種類（ツールチップ）

    #[serde(default, alias = "statusCode")]
    pub status: ReportStatus,

    #[serde(default, alias = "description")]
    pub summary: String,          // 概要

    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl MarkerReport {
    /// 両方の座標が有限値のときのみ `Some`
    pub fn coordinates(&self) -> Option<MapPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(MapPoint::new(lat, lng))
            }
            _ => None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// バックエンドによっては数値IDを返すため文字列に揃える
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// ステータス別件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub other: usize,
}

impl StatusCounts {
    pub fn from_reports(reports: &[MarkerReport]) -> Self {
        reports.iter().fold(Self::default(), |mut counts, report| {
            counts.total += 1;
            match report.status {
                ReportStatus::Pending => counts.pending += 1,
                ReportStatus::InProgress => counts.in_progress += 1,
                ReportStatus::Completed => counts.completed += 1,
                ReportStatus::Other(_) => counts.other += 1,
            }
            counts
        })
    }
}

/// 一覧の絞り込み条件（入力順は保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// 種類・概要の部分一致
    pub search: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportFilter {
    pub fn matches(&self, report: &MarkerReport) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !report.category.contains(term) && !report.summary.contains(term) {
                return false;
            }
        }

        match &self.status {
            Some(status) => &report.status == status,
            None => true,
        }
    }

    pub fn apply(&self, reports: &[MarkerReport]) -> Vec<MarkerReport> {
        reports.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(id: &str, status: ReportStatus, category: &str, summary: &str) -> MarkerReport {
        MarkerReport {
            id: id.to_string(),
            latitude: Some(24.71),
            longitude: Some(46.67),
            category: category.to_string(),
            status,
            summary: summary.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 7, 8, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_status_parse_known() {
        assert_eq!(ReportStatus::parse("pending"), ReportStatus::Pending);
        assert_eq!(ReportStatus::parse("in-progress"), ReportStatus::InProgress);
        assert_eq!(ReportStatus::parse("IN_PROGRESS"), ReportStatus::InProgress);
        assert_eq!(ReportStatus::parse("Completed"), ReportStatus::Completed);
    }

    #[test]
    fn test_status_unknown_round_trips() {
        let status = ReportStatus::parse("rejected");
        assert_eq!(status, ReportStatus::Other("rejected".to_string()));
        assert_eq!(String::from(status), "rejected");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ReportStatus::Pending.label(), "قيد المراجعة");
        assert_eq!(ReportStatus::Other("x".into()).label(), "غير محدد");
        assert_eq!(ReportStatus::Completed.label_en(), "Fixed");
    }

    #[test]
    fn test_report_deserialize_backend_columns() {
        let json = r#"{
            "id": "r-1",
            "location_lat": 24.7136,
            "location_lng": 46.6753,
            "type": "حفرة في الطريق",
            "status": "in-progress",
            "description": "حفرة كبيرة",
            "created_at": "2024-07-08T10:00:00Z"
        }"#;

        let report: MarkerReport = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(report.id, "r-1");
        assert_eq!(report.coordinates(), Some(MapPoint::new(24.7136, 46.6753)));
        assert_eq!(report.category, "حفرة في الطريق");
        assert_eq!(report.status, ReportStatus::InProgress);
        assert_eq!(report.summary, "حفرة كبيرة");
    }

    #[test]
    fn test_report_deserialize_null_latitude() {
        let json = r#"{"id": 7, "latitude": null, "longitude": 46.68,
                       "status": "completed", "createdAt": "2024-07-06T00:00:00Z"}"#;

        let report: MarkerReport = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(report.id, "7");
        assert!(!report.has_coordinates());
    }

    #[test]
    fn test_report_serialize_camel_case() {
        let r = report("a", ReportStatus::InProgress, "إضاءة معطلة", "");
        let json = serde_json::to_string(&r).expect("シリアライズ失敗");
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"status\":\"in-progress\""));
    }

    #[test]
    fn test_zero_coordinate_is_valid() {
        let mut r = report("a", ReportStatus::Pending, "", "");
        r.latitude = Some(0.0);
        assert!(r.has_coordinates());

        r.longitude = Some(f64::NAN);
        assert!(!r.has_coordinates());
    }

    #[test]
    fn test_status_counts() {
        let reports = vec![
            report("1", ReportStatus::Pending, "", ""),
            report("2", ReportStatus::Pending, "", ""),
            report("3", ReportStatus::Completed, "", ""),
            report("4", ReportStatus::Other("archived".into()), "", ""),
        ];

        let counts = StatusCounts::from_reports(&reports);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.in_progress, 0);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.other, 1);
    }

    #[test]
    fn test_filter_by_search_and_status() {
        let reports = vec![
            report("1", ReportStatus::Pending, "حفرة في الطريق", "شارع الملك فهد"),
            report("2", ReportStatus::InProgress, "إضاءة معطلة", "عمود الإضاءة"),
            report("3", ReportStatus::Pending, "رصيف مكسور", "حفرة صغيرة"),
        ];

        let filter = ReportFilter {
            search: Some("حفرة".to_string()),
            status: Some(ReportStatus::Pending),
        };
        let ids: Vec<_> = filter.apply(&reports).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let reports = vec![
            report("1", ReportStatus::Pending, "", ""),
            report("2", ReportStatus::Completed, "", ""),
        ];
        let filter = ReportFilter {
            search: Some(String::new()),
            status: None,
        };
        assert_eq!(filter.apply(&reports).len(), 2);
    }
}
