use clap::Parser;
use report_map::{cli, commands, config, error, export, loader};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use report_map_common::{
    legend_entries, render, InteractionMode, ReportFilter, StatusCounts, ViewState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Layout { input, layout, output } => {
            let reports = loader::load_reports(&input)?;
            let viewport = commands::resolve_viewport(&config, &layout)?;
            let seed = commands::resolve_seed(&config, &layout, &reports);

            let document = commands::layout_document(&reports, viewport, seed);
            eprintln!("✔ {}件中{}件を配置", document.total, document.markers.len());

            let json = export::json::layout_to_json(&document)?;
            export::write_output(&json, output.as_deref())?;
        }

        Commands::Project { x, y, width, height, center } => {
            let viewport = report_map_common::Viewport::new(
                width.unwrap_or(config.viewport_width),
                height.unwrap_or(config.viewport_height),
            )?;
            let center = center.unwrap_or(config.default_center);
            let point = report_map_common::project_click_to_coordinate(x, y, viewport, center);
            println!("{}", point);
        }

        Commands::Render { input, format, layout, select, selected, zoom, status, search, output } => {
            let reports = loader::load_reports(&input)?;
            let filter = ReportFilter {
                search,
                status: cli::parse_status(status.as_deref()),
            };
            let reports = filter.apply(&reports);

            let options = commands::RenderOptions {
                viewport: commands::resolve_viewport(&config, &layout)?,
                view: ViewState::new(
                    config.default_center,
                    commands::checked_zoom(zoom.unwrap_or(config.default_zoom))?,
                ),
                mode: if select { InteractionMode::SelectLocation } else { InteractionMode::Browse },
                selected,
                seed: commands::resolve_seed(&config, &layout, &reports),
            };

            let widget = commands::build_widget(reports, &options);
            eprintln!("✔ マーカー{}件を描画", widget.placements().len());

            let draw = render(&widget);
            let content = export::format_commands(&draw, format, options.viewport)?;
            export::write_output(&content, output.as_deref())?;
        }

        Commands::Zoom { direction, from, steps } => {
            let start = from.unwrap_or(config.default_zoom);
            let sequence = commands::zoom_sequence(start, direction, steps)?;
            let rendered: Vec<String> = sequence.iter().map(|z| z.to_string()).collect();
            println!("{} -> {}", start, rendered.join(" -> "));
        }

        Commands::Locate { select } => {
            let mode = if select { InteractionMode::SelectLocation } else { InteractionMode::Browse };
            println!("📍 現在地を取得中...");
            let (widget, recentered) = commands::locate(&config, mode).await?;
            println!("✔ 地図中心: {}", recentered.center);
            println!("  ズーム: {}", widget.view().zoom);
            if let Some(report_map_common::MapEvent::LocationPicked(point)) = recentered.event {
                println!("✔ 選択地点: {}", point);
            }
        }

        Commands::Legend => {
            println!("حالة البلاغات");
            for entry in legend_entries() {
                println!("  {} {} ({})", entry.color, entry.label, entry.status.label_en());
            }
        }

        Commands::Stats { input, status, search } => {
            let reports = loader::load_reports(&input)?;
            let filter = ReportFilter {
                search,
                status: cli::parse_status(status.as_deref()),
            };
            let filtered = filter.apply(&reports);
            let counts = StatusCounts::from_reports(&filtered);
            let mappable = filtered.iter().filter(|r| r.has_coordinates()).count();

            println!("通報: {}件（位置情報あり {}件）", counts.total, mappable);
            println!("  قيد المراجعة: {}", counts.pending);
            println!("  قيد الإصلاح: {}", counts.in_progress);
            println!("  تم الإصلاح: {}", counts.completed);
            if counts.other > 0 {
                println!("  غير محدد: {}", counts.other);
            }
        }

        Commands::Config { set_center, set_location, clear_location, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(center) = set_center {
                config.default_center = center;
                changed = true;
                println!("✔ 地図中心を設定しました: {}", center);
            }

            if let Some(location) = set_location {
                config.device_location = Some(location);
                changed = true;
                println!("✔ 現在地を設定しました: {}", location);
            } else if clear_location {
                config.device_location = None;
                changed = true;
                println!("✔ 現在地の設定を削除しました");
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  地図中心: {}", config.default_center);
                println!("  ズーム: {}", config.default_zoom);
                println!("  ビューポート: {}x{}px", config.viewport_width, config.viewport_height);
                match config.device_location {
                    Some(location) => println!("  現在地: {}", location),
                    None => println!("  現在地: 未設定"),
                }
                match config.layout_seed {
                    Some(seed) => println!("  シード: {}", seed),
                    None => println!("  シード: なし（毎回ランダム）"),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
