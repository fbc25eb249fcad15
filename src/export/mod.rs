pub mod json;
pub mod svg;

use crate::error::Result;
use report_map_common::{DrawCommand, Viewport};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "svg" => Ok(ExportFormat::Svg),
            _ => Err(format!("Unknown format: {}. Use json or svg", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// 描画コマンドを指定形式の文字列にする
pub fn format_commands(
    commands: &[DrawCommand],
    format: ExportFormat,
    viewport: Viewport,
) -> Result<String> {
    match format {
        ExportFormat::Json => json::commands_to_json(commands),
        ExportFormat::Svg => Ok(svg::commands_to_svg(commands, viewport)),
    }
}

/// 出力先が指定されていればファイルへ、なければ標準出力へ
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            println!("✔ 出力: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
