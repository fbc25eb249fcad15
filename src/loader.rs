//! 通報データ（JSON）の読み込み
//!
//! 入力はJSON配列のファイル、またはJSONファイルを含むフォルダ。
//! フォルダの場合は直下の `*.json` をファイル名順に連結する。

use crate::error::{ReportMapError, Result};
use report_map_common::MarkerReport;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn load_reports(input: &Path) -> Result<Vec<MarkerReport>> {
    if !input.exists() {
        return Err(ReportMapError::FileNotFound(input.display().to_string()));
    }

    if input.is_file() {
        return load_report_file(input);
    }

    let files = scan_report_files(input);
    if files.is_empty() {
        return Err(ReportMapError::NoReportsFound(input.display().to_string()));
    }

    let mut reports = Vec::new();
    for file in &files {
        let loaded = load_report_file(file)?;
        tracing::debug!(path = %file.display(), count = loaded.len(), "通報ファイルを読み込み");
        reports.extend(loaded);
    }
    Ok(reports)
}

pub fn load_report_file(path: &Path) -> Result<Vec<MarkerReport>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ReportMapError::ReportParse {
        path: path.display().to_string(),
        source,
    })
}

/// フォルダ直下のJSONファイル（ファイル名順）
pub fn scan_report_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && is_json(path))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("reports.json")));
        assert!(is_json(Path::new("REPORTS.JSON")));
        assert!(!is_json(Path::new("reports.txt")));
        assert!(!is_json(Path::new("reports")));
    }
}
