use anyhow::{bail, Result};
use chrono::Datelike;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use econ_dashboard::aggregator::IndicatorTable;
use econ_dashboard::api::FredClient;
use econ_dashboard::catalog::CountryCatalog;
use econ_dashboard::dashboard::{CountryComparison, DashboardSnapshot};
use econ_dashboard::export;
use econ_dashboard::fetcher::SeriesFetcher;
use econ_dashboard::models::{Config, DateRange};

/// Maximum number of countries in one comparison, as in the original picker.
const MAX_COUNTRIES: usize = 5;

/// Rows of recent history shown per indicator table.
const DISPLAY_QUARTERS: usize = 12;

#[derive(Parser, Debug)]
#[command(
    name = "econ-dashboard",
    about = "🌍 Global economic data dashboard: GDP growth, unemployment and inflation from FRED"
)]
struct Cli {
    /// Countries to compare, comma-separated (label or bare name, max 5).
    /// Defaults to the first two catalog entries.
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// First year of the observation window
    #[arg(long, default_value_t = 2015)]
    start_year: i32,

    /// Last year of the observation window (defaults to the current year)
    #[arg(long)]
    end_year: Option<i32>,

    /// Write the combined dataset as CSV to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("econ_dashboard=info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            eprintln!("Make sure you have a .env file with FRED_API_KEY set.");
            std::process::exit(1);
        }
    };

    let catalog = CountryCatalog::builtin();

    let names: Vec<String> = if cli.countries.is_empty() {
        catalog
            .entries()
            .iter()
            .take(2)
            .map(|e| e.label.clone())
            .collect()
    } else {
        cli.countries
    };
    if names.len() > MAX_COUNTRIES {
        bail!("select at most {MAX_COUNTRIES} countries ({} given)", names.len());
    }
    let countries = catalog.resolve(&names)?;

    let end_year = cli.end_year.unwrap_or_else(|| chrono::Utc::now().year());
    if cli.start_year > end_year {
        bail!("start year {} is after end year {}", cli.start_year, end_year);
    }
    let range = DateRange::from_years(cli.start_year, end_year)
        .ok_or_else(|| anyhow::anyhow!("invalid year range"))?;

    let client = FredClient::new(&config)?;
    let fetcher = SeriesFetcher::new(client, &config);

    println!("🌍 Global Economic Data Dashboard");
    println!("📅 {} to {}", range.start, range.end);

    let snapshot = DashboardSnapshot::build(&fetcher, &countries, range).await?;

    for view in snapshot.views() {
        println!();
        println!(
            "=== {} (Data Availability: {}) ===",
            view.table.indicator.title(),
            view.status.glyph()
        );
        print_table(&view.table.top_rows(DISPLAY_QUARTERS));
    }

    if let [first, second] = snapshot.countries.as_slice() {
        if let Some(comparison) = snapshot.compare(&first.label, &second.label) {
            print_comparison(&comparison);
        }
    }

    if let Some(path) = cli.output {
        export::export_to_path(&snapshot.combined_table(), &path)?;
        println!("\n📥 Saved combined dataset to {}", path.display());
    }

    Ok(())
}

/// Two-decimal percent formatting for display; stored values stay unrounded.
fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "Not Available".to_string(),
    }
}

fn print_table(table: &IndicatorTable) {
    if table.is_empty() {
        println!("(no data)");
        return;
    }

    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.label.chars().count().max(14))
        .collect();

    print!("{:<12}", "Quarter");
    for (column, width) in table.columns.iter().zip(&widths) {
        print!("  {:>width$}", column.label, width = width);
    }
    println!();

    for (row, date) in table.dates.iter().enumerate() {
        print!("{:<12}", date.to_string());
        for (column, width) in table.columns.iter().zip(&widths) {
            print!("  {:>width$}", format_cell(column.values[row]), width = width);
        }
        println!();
    }
}

fn print_comparison(comparison: &CountryComparison) {
    println!();
    println!(
        "=== Side by side: {} vs {} ===",
        comparison.first_label, comparison.second_label
    );
    for metric in &comparison.metrics {
        let difference = match metric.difference {
            Some(d) => format!("{d:+.2}%"),
            None => "n/a".to_string(),
        };
        println!(
            "{:<14} {:>14} vs {:>14}  (diff {})",
            metric.indicator.title(),
            format_cell(metric.first),
            format_cell(metric.second),
            difference
        );
    }
}
