mod chart;
mod config;
mod dataset;
mod error;
mod logging;
mod models;
mod ui;

use chart::derive_chart;
use chart::options::format_usage;
use clap::{Parser, Subcommand};
use config::{ensure_initialized, load_config};
use dataset::{daily_usage, monthly_usage};
use error::AppError;
use models::{ViewMode, ViewState};
use ui::run::run_tui;

#[derive(Debug, Parser)]
#[command(name = "usage-chart")]
#[command(about = "Data usage bar chart with monthly to daily drilldown")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Init,
    Tui,
    Render {
        #[arg(long, default_value = "monthly")]
        mode: String,
        #[arg(long)]
        month: Option<usize>,
        #[arg(long, default_value = "json")]
        format: String,
    },
    Export {
        #[arg(long, default_value = "monthly")]
        series: String,
        #[arg(long, default_value = "json")]
        format: String,
    },
}

fn parse_mode(input: &str) -> Result<ViewMode, AppError> {
    match input.to_ascii_lowercase().as_str() {
        "monthly" => Ok(ViewMode::Monthly),
        "daily" => Ok(ViewMode::Daily),
        _ => Err(AppError::Config(
            "Unsupported mode. Use monthly or daily.".into(),
        )),
    }
}

fn view_for(mode: ViewMode, month: Option<usize>) -> ViewState {
    let mut view = ViewState::default();
    if mode == ViewMode::Daily {
        view.enter_drilldown(month.unwrap_or(0));
    }
    view
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn render_text(spec: &chart::ChartSpec) -> String {
    let mut out = format!(
        "{} ({} / {})\n",
        spec.data.label, spec.options.x.title, spec.options.y.title
    );
    let marked: Vec<usize> = spec
        .options
        .annotations
        .iter()
        .map(|chart::annotation::Annotation::Box(b)| b.index)
        .collect();
    for (index, (label, value)) in spec.data.labels.iter().zip(&spec.data.values).enumerate() {
        let marker = if marked.contains(&index) { " *" } else { "" };
        out.push_str(&format!("{label:<10} {:>10}{marker}\n", format_usage(*value)));
    }
    out
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            ensure_initialized()?;
            println!("Initialized usage-chart config and log directories.");
        }
        Commands::Tui => {
            ensure_initialized()?;
            let cfg = load_config()?;
            logging::init(&cfg.log_level)?;
            run_tui(&cfg)?;
        }
        Commands::Render {
            mode,
            month,
            format,
        } => {
            let cfg = load_config()?;
            let view = view_for(parse_mode(&mode)?, month);
            let spec = derive_chart(&view, &monthly_usage(), &daily_usage(), cfg.billing_day);
            if format.eq_ignore_ascii_case("json") {
                println!("{}", serde_json::to_string_pretty(&spec)?);
            } else if format.eq_ignore_ascii_case("text") {
                print!("{}", render_text(&spec));
            } else {
                return Err(AppError::Config(
                    "Unsupported render format. Use json or text".into(),
                ));
            }
        }
        Commands::Export { series, format } => {
            let mode = parse_mode(&series)?;
            if format.eq_ignore_ascii_case("json") {
                let json = match mode {
                    ViewMode::Monthly => serde_json::to_string_pretty(&monthly_usage())?,
                    ViewMode::Daily => serde_json::to_string_pretty(&daily_usage())?,
                };
                println!("{json}");
            } else if format.eq_ignore_ascii_case("csv") {
                let rows: Vec<(String, f64)> = match mode {
                    ViewMode::Monthly => monthly_usage()
                        .into_iter()
                        .map(|m| (m.month, m.usage))
                        .collect(),
                    ViewMode::Daily => daily_usage()
                        .into_iter()
                        .map(|d| (d.day, d.usage))
                        .collect(),
                };
                println!("label,usage_gb");
                for (label, usage) in rows {
                    println!("{},{}", csv_field(&label), usage);
                }
            } else {
                return Err(AppError::Config(
                    "Unsupported export format. Use json or csv".into(),
                ));
            }
        }
    }

    Ok(())
}
