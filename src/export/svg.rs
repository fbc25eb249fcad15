//! SVG出力
//!
//! 描画コマンドをそのままSVG要素へ写す。ブラウザ版の見た目
//! （グリッド背景・補助線・白縁の円マーカー・凡例）に合わせている。

use report_map_common::style::{legend_rect, select_hint_rect, LEGEND_HEADER_PX, LEGEND_ROW_PX};
use report_map_common::{Axis, DrawCommand, Rgb, Viewport};
use std::fmt::Write;

const BACKGROUND: &str = "#eff6ff";
const GRID_STROKE: &str = "rgba(0,0,0,0.05)";
const STREET_STROKE: &str = "#d1d5db";

pub fn commands_to_svg(commands: &[DrawCommand], viewport: Viewport) -> String {
    let (w, h) = (viewport.width, viewport.height);
    let mut body = String::new();

    for command in commands {
        match command {
            // 以前の要素を破棄して描き直す
            DrawCommand::Clear => body.clear(),
            DrawCommand::Background { grid_spacing_px } => {
                let s = grid_spacing_px;
                let _ = write!(
                    body,
                    r#"<defs><pattern id="grid" width="{s}" height="{s}" patternUnits="userSpaceOnUse"><path d="M {s} 0 L 0 0 0 {s}" fill="none" stroke="{GRID_STROKE}" stroke-width="1"/></pattern></defs><rect width="{w}" height="{h}" rx="8" fill="{BACKGROUND}"/><rect width="{w}" height="{h}" rx="8" fill="url(#grid)"/>"#
                );
            }
            DrawCommand::StreetLine { axis, fraction } => {
                let (x1, y1, x2, y2) = match axis {
                    Axis::Horizontal => (0.0, h * fraction, w, h * fraction),
                    Axis::Vertical => (w * fraction, 0.0, w * fraction, h),
                };
                let _ = write!(
                    body,
                    r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{STREET_STROKE}" stroke-width="2" opacity="0.6"/>"#
                );
            }
            DrawCommand::Marker { report_id, label, x_percent, y_percent, diameter_px, fill } => {
                let (cx, cy) = (w * x_percent / 100.0, h * y_percent / 100.0);
                let _ = write!(
                    body,
                    r#"<g class="marker" data-report-id="{id}"><title>{title}</title><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{white}" stroke-width="2"/><circle cx="{cx}" cy="{cy}" r="4" fill="{white}"/></g>"#,
                    id = escape_xml(report_id),
                    title = escape_xml(label),
                    r = diameter_px / 2.0,
                    fill = fill.hex(),
                    white = Rgb::WHITE.hex(),
                );
            }
            DrawCommand::SelectedLocation { x_percent, y_percent, diameter_px, fill } => {
                let (cx, cy) = (w * x_percent / 100.0, h * y_percent / 100.0);
                let _ = write!(
                    body,
                    r#"<g class="selected-location"><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{white}" stroke-width="3"/><circle cx="{cx}" cy="{cy}" r="6" fill="{white}"/></g>"#,
                    r = diameter_px / 2.0,
                    fill = fill.hex(),
                    white = Rgb::WHITE.hex(),
                );
            }
            DrawCommand::Legend { entries } => {
                let rect = legend_rect(entries.len());
                let _ = write!(
                    body,
                    r#"<g class="legend" direction="rtl"><rect x="{x}" y="{y}" width="{width}" height="{height}" rx="8" fill="{white}"/><text x="{tx}" y="{ty}" font-size="12" font-weight="bold" text-anchor="start">حالة البلاغات</text>"#,
                    x = rect.x,
                    y = rect.y,
                    width = rect.width,
                    height = rect.height,
                    tx = rect.right() - 12.0,
                    ty = rect.y + 20.0,
                    white = Rgb::WHITE.hex(),
                );
                for (i, entry) in entries.iter().enumerate() {
                    let y = rect.y + LEGEND_HEADER_PX + 4.0 + LEGEND_ROW_PX * i as f64;
                    let _ = write!(
                        body,
                        r#"<circle cx="{cx}" cy="{cy}" r="6" fill="{fill}"/><text x="{tx}" y="{y}" font-size="12" text-anchor="start">{label}</text>"#,
                        cx = rect.right() - 18.0,
                        tx = rect.right() - 30.0,
                        cy = y - 4.0,
                        fill = entry.color.hex(),
                        label = escape_xml(&entry.label),
                    );
                }
                body.push_str("</g>");
            }
            DrawCommand::SelectHint { text } => {
                let rect = select_hint_rect(viewport);
                let _ = write!(
                    body,
                    r##"<g class="select-hint"><rect x="{x}" y="{y}" width="{width}" height="{height}" rx="8" fill="#eff6ff" stroke="#bfdbfe"/><text x="{cx}" y="{ty}" font-size="12" fill="#1e40af" text-anchor="middle">{text}</text></g>"##,
                    x = rect.x,
                    y = rect.y,
                    width = rect.width,
                    height = rect.height,
                    cx = w / 2.0,
                    ty = rect.y + 20.0,
                    text = escape_xml(text),
                );
            }
        }
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#
    )
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
