use std::path::Path;

use anyhow::Result;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Stroke};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use report_map_common::geo::PixelRect;
use report_map_common::style::{legend_rect, select_hint_rect, LEGEND_HEADER_PX, LEGEND_ROW_PX};
use report_map_common::{
    render, Axis, DrawCommand, InteractionMode, LocationUnavailable, MapEvent, MapPoint, Rgb,
    StatusCounts, ThreadJitter, Viewport, ZoomDirection,
};

use crate::io::{device_location, load_reports};
use crate::model::AppState;

const MAP_BACKGROUND: Color32 = Color32::from_rgb(0xef, 0xf6, 0xff);
const STREET_COLOR: Color32 = Color32::from_rgba_premultiplied(0xd1, 0xd5, 0xdb, 0x99);

#[derive(Default)]
pub struct DesktopApp {
    state: AppState,
    status: String,
}

impl DesktopApp {
    fn open_json(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match self.load_from_path(&path) {
                Ok(rendered) => self.status = format!("Loaded {} ({rendered} on map)", path.display()),
                Err(err) => self.status = format!("Load failed: {err:#}"),
            }
        }
    }

    fn reload_json(&mut self) {
        let Some(path) = self.state.source_path.clone() else {
            self.status = "No source file loaded".to_string();
            return;
        };
        match self.load_from_path(&path) {
            Ok(rendered) => self.status = format!("Reloaded {} ({rendered} on map)", path.display()),
            Err(err) => self.status = format!("Reload failed: {err:#}"),
        }
    }

    fn load_from_path(&mut self, path: &Path) -> Result<usize> {
        let reports = load_reports(path)?;
        let rendered = self.state.widget.set_reports(reports, &mut ThreadJitter);
        self.state.selected_report = None;
        self.state.source_path = Some(path.to_path_buf());
        Ok(rendered)
    }

    fn set_select_mode(&mut self, enabled: bool) {
        let mode = if enabled {
            InteractionMode::SelectLocation
        } else {
            self.state.widget.set_selected_point(None);
            self.state.picked = None;
            InteractionMode::Browse
        };
        self.state.widget.set_mode(mode);
    }

    fn handle_map_click(&mut self, x: f64, y: f64) {
        match self.state.widget.handle_click(x, y) {
            Some(MapEvent::MarkerSelected(report)) => {
                self.status = format!("Selected report {}", report.id);
                self.state.selected_report = Some(report);
            }
            Some(MapEvent::LocationPicked(point)) => self.pick_location(point),
            None => {}
        }
    }

    fn pick_location(&mut self, point: MapPoint) {
        self.state.widget.set_selected_point(Some(point));
        self.state.picked = Some(point);
        self.status = format!("Picked {point}");
    }

    fn locate(&mut self) {
        let fix = match device_location() {
            Ok(location) => location.ok_or(LocationUnavailable::Unsupported),
            Err(err) => {
                self.status = format!("Locate failed: {err:#}");
                return;
            }
        };

        match self.state.widget.apply_location_fix(fix) {
            Ok(recentered) => {
                self.status = format!("Centered on {}", recentered.center);
                if let Some(MapEvent::LocationPicked(point)) = recentered.event {
                    self.pick_location(point);
                }
            }
            Err(reason) => {
                self.status = format!("Location unavailable: {reason} (set REPORT_MAP_LOCATION)");
            }
        }
    }

    fn render_map(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        // 実際の描画領域に合わせる（配置は百分率なので再配置しない）
        if self.state.widget.resize(rect.width() as f64, rect.height() as f64).is_err() {
            return;
        }

        let viewport = self.state.widget.viewport();
        for command in render(&self.state.widget) {
            paint_command(&painter, rect, viewport, &command);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                self.handle_map_click(local.x as f64, local.y as f64);
            }
        }

        let hovered = response.hover_pos().and_then(|pos| {
            let local = pos - rect.min;
            self.state
                .widget
                .marker_at(local.x as f64, local.y as f64)
                .map(|report| report.category.clone())
        });
        if let Some(category) = hovered {
            response.on_hover_text(category);
        }
    }

    fn render_details(&self, ui: &mut egui::Ui) {
        let counts = StatusCounts::from_reports(self.state.widget.reports());
        ui.label(format!(
            "{} reports, {} on map",
            counts.total,
            self.state.widget.placements().len()
        ));
        ui.label(format!(
            "pending {} / in progress {} / completed {}",
            counts.pending, counts.in_progress, counts.completed
        ));
        ui.separator();

        if let Some(point) = self.state.picked {
            ui.label(RichText::new("Picked Location").strong());
            ui.label(point.to_string());
            ui.separator();
        }

        let Some(report) = &self.state.selected_report else {
            ui.label("Click a marker to see details.");
            return;
        };

        let fill = to_color32(report_map_common::status_color(&report.status));
        ui.label(RichText::new(&report.category).strong().size(16.0));
        ui.label(RichText::new(report.status.label_en()).color(fill));
        if !report.summary.is_empty() {
            ui.label(&report.summary);
        }
        ui.label(
            RichText::new(report.created_at.format("%Y-%m-%d").to_string())
                .color(Color32::from_gray(170)),
        );
        if let Some(point) = report.coordinates() {
            ui.label(RichText::new(point.to_string()).color(Color32::from_gray(170)));
        }
    }
}

fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn percent_pos(rect: Rect, x_percent: f64, y_percent: f64) -> Pos2 {
    rect.min
        + egui::vec2(
            rect.width() * (x_percent / 100.0) as f32,
            rect.height() * (y_percent / 100.0) as f32,
        )
}

/// ウィジェット座標の矩形を描画領域の矩形へ
fn screen_rect(rect: Rect, area: PixelRect) -> Rect {
    Rect::from_min_size(
        rect.min + egui::vec2(area.x as f32, area.y as f32),
        egui::vec2(area.width as f32, area.height as f32),
    )
}

fn paint_command(painter: &egui::Painter, rect: Rect, viewport: Viewport, command: &DrawCommand) {
    let white = to_color32(Rgb::WHITE);
    match command {
        DrawCommand::Clear => {
            painter.rect_filled(rect, 8.0, MAP_BACKGROUND);
        }
        DrawCommand::Background { grid_spacing_px } => {
            let step = (*grid_spacing_px as f32).max(1.0);
            let stroke = Stroke::new(1.0, Color32::from_black_alpha(13));
            let mut x = rect.left();
            while x <= rect.right() {
                painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
                x += step;
            }
            let mut y = rect.top();
            while y <= rect.bottom() {
                painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
                y += step;
            }
        }
        DrawCommand::StreetLine { axis, fraction } => {
            let f = *fraction as f32;
            let points = match axis {
                Axis::Horizontal => {
                    let y = rect.top() + rect.height() * f;
                    [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)]
                }
                Axis::Vertical => {
                    let x = rect.left() + rect.width() * f;
                    [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())]
                }
            };
            painter.line_segment(points, Stroke::new(2.0, STREET_COLOR));
        }
        DrawCommand::Marker { x_percent, y_percent, diameter_px, fill, .. } => {
            let center = percent_pos(rect, *x_percent, *y_percent);
            painter.circle(center, *diameter_px as f32 / 2.0, to_color32(*fill), Stroke::new(2.0, white));
            painter.circle_filled(center, 4.0, white);
        }
        DrawCommand::SelectedLocation { x_percent, y_percent, diameter_px, fill } => {
            let center = percent_pos(rect, *x_percent, *y_percent);
            painter.circle(center, *diameter_px as f32 / 2.0, to_color32(*fill), Stroke::new(3.0, white));
            painter.circle_filled(center, 6.0, white);
        }
        DrawCommand::Legend { entries } => {
            let legend = screen_rect(rect, legend_rect(entries.len()));
            painter.rect_filled(legend, 8.0, white);
            painter.text(
                Pos2::new(legend.right() - 12.0, legend.top() + 10.0),
                Align2::RIGHT_TOP,
                "حالة البلاغات",
                FontId::proportional(12.0),
                Color32::BLACK,
            );
            for (i, entry) in entries.iter().enumerate() {
                let y = legend.top() + (LEGEND_HEADER_PX + LEGEND_ROW_PX * i as f64) as f32;
                painter.circle_filled(Pos2::new(legend.right() - 18.0, y), 6.0, to_color32(entry.color));
                painter.text(
                    Pos2::new(legend.right() - 30.0, y),
                    Align2::RIGHT_CENTER,
                    &entry.label,
                    FontId::proportional(12.0),
                    Color32::DARK_GRAY,
                );
            }
        }
        DrawCommand::SelectHint { text } => {
            let bar = screen_rect(rect, select_hint_rect(viewport));
            painter.rect(bar, 8.0, MAP_BACKGROUND, Stroke::new(1.0, Color32::from_rgb(0xbf, 0xdb, 0xfe)));
            painter.text(
                bar.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(12.0),
                Color32::from_rgb(0x1e, 0x40, 0xaf),
            );
        }
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\tahoma.ttf",
        r"C:\Windows\Fonts\arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansArabic-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("arabic_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("arabic_fallback".to_string());
            fonts.families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("arabic_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open JSON").clicked() {
                        self.open_json();
                        ui.close_menu();
                    }
                    if ui.button("Reload JSON").clicked() {
                        self.reload_json();
                        ui.close_menu();
                    }
                });

                ui.separator();
                let zoom = self.state.widget.view().zoom;
                if ui.button("−").clicked() {
                    self.state.widget.zoom(ZoomDirection::Out);
                }
                ui.label(format!("Zoom {zoom}"));
                if ui.button("+").clicked() {
                    self.state.widget.zoom(ZoomDirection::In);
                }
                if ui.button("📍 Locate").clicked() {
                    self.locate();
                }

                let mut select = self.state.widget.mode() == InteractionMode::SelectLocation;
                if ui.checkbox(&mut select, "Select location").changed() {
                    self.set_select_mode(select);
                }

                ui.separator();
                ui.label(
                    RichText::new(format!("Center {}", self.state.widget.view().center))
                        .color(Color32::from_gray(170)),
                );
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        egui::SidePanel::right("details").resizable(true).show(ctx, |ui| {
            ui.heading("Details");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_details(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_map(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selecting_app() -> DesktopApp {
        let mut app = DesktopApp::default();
        app.state.widget.resize(400.0, 300.0).unwrap();
        app.set_select_mode(true);
        app
    }

    #[test]
    fn test_click_on_legend_keeps_pick_empty() {
        let mut app = selecting_app();
        let legend = legend_rect(report_map_common::legend_entries().len());
        app.handle_map_click(legend.x + legend.width / 2.0, legend.y + legend.height / 2.0);
        assert_eq!(app.state.picked, None);
        assert_eq!(app.state.widget.selected_point(), None);
    }

    #[test]
    fn test_click_on_select_hint_keeps_pick_empty() {
        let mut app = selecting_app();
        let hint = select_hint_rect(app.state.widget.viewport());
        app.handle_map_click(200.0, hint.y + hint.height / 2.0);
        assert_eq!(app.state.picked, None);
    }

    #[test]
    fn test_background_click_picks_location() {
        let mut app = selecting_app();
        app.handle_map_click(200.0, 150.0);
        assert_eq!(app.state.picked, Some(app.state.widget.view().center));
        assert!(app.state.widget.selected_point().is_some());
    }

    #[test]
    fn test_screen_rect_offsets_by_map_origin() {
        let map = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(400.0, 300.0));
        let legend = screen_rect(map, legend_rect(3));
        assert_eq!(legend.min, Pos2::new(26.0, 36.0));
        assert_eq!(legend.size(), egui::vec2(160.0, 96.0));
    }
}
