//! CLI entry point for the ridership insights tool.
//!
//! Provides subcommands for fetching the published dataset, listing the
//! known lines, building per-line reports, computing the correlation
//! matrix and total-ridership series, and exporting the normalized table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ridership_insights::{
    analyzers::{aggregate::with_total, correlate::correlation_matrix, report::line_report},
    fetch::{BasicClient, fetch_bytes},
    output::{export_table, print_json},
    parser::parse_table,
    table::{Line, NormalizedTable},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Published CSV endpoint of the ridership headline dataset.
const DEFAULT_DATA_URL: &str = "https://storage.data.gov.my/transportation/ridership_headline.csv";

#[derive(Parser)]
#[command(name = "ridership_insights")]
#[command(about = "A tool to analyze Malaysian public transit ridership", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the published dataset to a local CSV file
    Fetch {
        /// URL to fetch; defaults to RIDERSHIP_DATA_URL or the data.gov.my endpoint
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// File to write the dataset to
        #[arg(short, long, default_value = "ridership.csv")]
        output: String,
    },
    /// List the known line identifiers and their service descriptions
    Lines,
    /// Build the full per-line report for one selected line
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Line identifier to report on (e.g. "bus_rkl")
        #[arg(short, long)]
        line: String,
    },
    /// Compute the pairwise correlation matrix over all 12 lines
    Correlate {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Compute the total-ridership series over all lines
    Totals {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Normalize the dataset and re-export it as CSV
    Export {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// File to write the normalized table to
        #[arg(short, long, default_value = "ridership.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/ridership_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ridership_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { url, output } => {
            let url = url
                .or_else(|| std::env::var("RIDERSHIP_DATA_URL").ok())
                .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());

            let client = BasicClient::new();
            let bytes = fetch_bytes(&client, &url).await?;
            std::fs::write(&output, &bytes)?;

            info!(url = %url, output = %output, bytes = bytes.len(), "Dataset downloaded");
        }
        Commands::Lines => {
            for line in Line::ALL {
                info!(
                    id = line.as_str(),
                    description = line.description(),
                    "Line"
                );
            }
        }
        Commands::Report { source, line } => {
            let line = Line::parse(&line)?;
            let table = load_table(&source).await?;

            let report = line_report(&table, line)?;
            print_json(&report)?;
        }
        Commands::Correlate { source } => {
            let table = load_table(&source).await?;

            let matrix = correlation_matrix(&table, &Line::ALL)?;
            print_json(&matrix)?;
        }
        Commands::Totals { source } => {
            let table = load_table(&source).await?;

            print_json(&with_total(&table))?;
        }
        Commands::Export { source, output } => {
            let table = load_table(&source).await?;

            export_table(&output, &table)?;
            info!(output = %output, rows = table.len(), "Table exported");
        }
    }

    Ok(())
}

/// Loads the dataset from a local file path or over HTTP, then parses and
/// normalizes it.
#[tracing::instrument(fields(source = %source))]
async fn load_table(source: &str) -> Result<NormalizedTable> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };

    debug!(bytes = bytes.len(), "Dataset bytes loaded, parsing");
    let raw = parse_table(&bytes)?;
    Ok(NormalizedTable::normalize(raw)?)
}
