//! 通報データ読み込みの統合テスト

use report_map::loader;
use report_map_common::ReportStatus;
use tempfile::tempdir;

const FIRST: &str = r#"[
  {"id": 1, "latitude": 24.7136, "longitude": 46.6753, "type": "حفرة في الطريق", "status": "pending", "description": "حفرة كبيرة", "createdAt": "2024-07-08T09:00:00Z"},
  {"id": 2, "latitude": null, "longitude": null, "type": "إنارة", "status": "completed", "createdAt": "2024-07-09T09:00:00Z"}
]"#;

const SECOND: &str = r#"[
  {"id": "r-3", "location_lat": 24.70, "location_lng": 46.68, "type": "نظافة", "status": "in_progress", "created_at": "2024-07-10T09:00:00Z"}
]"#;

#[test]
fn test_load_single_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reports.json");
    std::fs::write(&path, FIRST).unwrap();

    let reports = loader::load_reports(&path).expect("読み込み失敗");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].id, "1");
    assert!(reports[0].has_coordinates());
    assert!(!reports[1].has_coordinates());
}

#[test]
fn test_load_folder_in_file_name_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("b.json"), SECOND).unwrap();
    std::fs::write(dir.path().join("a.json"), FIRST).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let sub = dir.path().join("nested");
    std::fs::create_dir(&sub).unwrap();
    std::fs::write(sub.join("c.json"), FIRST).unwrap();

    let reports = loader::load_reports(dir.path()).expect("読み込み失敗");
    let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "r-3"], "サブフォルダは読まない");
    assert_eq!(reports[2].status, ReportStatus::InProgress);
}

#[test]
fn test_scan_report_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("z.JSON"), "[]").unwrap();
    std::fs::write(dir.path().join("m.json"), "[]").unwrap();

    let files = loader::scan_report_files(dir.path());
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["m.json", "z.JSON"]);
}
