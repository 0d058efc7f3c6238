//! CLI entry point for the misery tracker.
//!
//! Provides subcommands for building the per-agency dashboard report,
//! appending CSV history snapshots, and listing configured lines.

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use misery_tracker::agency::Agency;
use misery_tracker::analyzers::aggregate::aggregate_records;
use misery_tracker::analyzers::types::MiseryReport;
use misery_tracker::{
    fetch::{
        BasicClient,
        auth::{AppToken, UrlParam},
        fetch_rows,
    },
    output::{append_history, write_report},
    parser::parse_rows,
    record::{RawRecord, filter_recent},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "misery_tracker")]
#[command(about = "A commuter-rail misery index aggregator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch delay data, aggregate it, and write the dashboard report
    Analyze {
        /// Agency deployment to analyze
        #[arg(short, long, value_enum, default_value_t = Agency::Lirr)]
        agency: Agency,

        /// Local JSON file or URL overriding the agency endpoint
        #[arg(long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// File to write the JSON report to
        #[arg(short, long, default_value = "report.json")]
        output: String,

        /// Maximum number of rows to request
        #[arg(short, long, default_value_t = 5000)]
        limit: usize,
    },
    /// Run the pipeline and append per-line history rows to a CSV file
    Snapshot {
        /// Agency deployment to snapshot
        #[arg(short, long, value_enum, default_value_t = Agency::Lirr)]
        agency: Agency,

        /// Local JSON file or URL overriding the agency endpoint
        #[arg(long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// CSV file to append history rows to
        #[arg(short, long, default_value = "history.csv")]
        output: String,

        /// Maximum number of rows to request
        #[arg(short, long, default_value_t = 5000)]
        limit: usize,
    },
    /// List an agency's configured lines with their fallback scores
    ListLines {
        /// Agency deployment to list
        #[arg(short, long, value_enum, default_value_t = Agency::Lirr)]
        agency: Agency,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/misery_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("misery_tracker.log"));

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
        Commands::Analyze {
            agency,
            source,
            output,
            limit,
        } => {
            let report = build_report(agency, source.as_deref(), limit).await;
            write_report(&output, &report)?;

            let mut ranked: Vec<_> = report.lines.iter().collect();
            ranked.sort_by(|a, b| b.1.misery_score.cmp(&a.1.misery_score));
            if let Some((line, summary)) = ranked.first() {
                info!(
                    line = %line,
                    misery_score = summary.misery_score,
                    avg_delay = summary.avg_delay,
                    "Most miserable line"
                );
            }

            info!(
                path = %output,
                live = report.live,
                lines = report.lines.len(),
                causes = report.causes.len(),
                "Report written"
            );
        }
        Commands::Snapshot {
            agency,
            source,
            output,
            limit,
        } => {
            let report = build_report(agency, source.as_deref(), limit).await;
            append_history(&output, &report.agency, &report.lines)?;

            info!(
                path = %output,
                live = report.live,
                rows = report.lines.len(),
                "History rows appended"
            );
        }
        Commands::ListLines { agency } => {
            let lines = agency.fallback_lines();

            let mut ranked: Vec<_> = lines.iter().collect();
            ranked.sort_by(|a, b| b.1.misery_score.cmp(&a.1.misery_score));

            info!(
                agency = agency.label(),
                total = ranked.len(),
                "Configured lines"
            );

            for (name, summary) in ranked {
                info!(
                    line = %name,
                    misery_score = summary.misery_score,
                    avg_delay = summary.avg_delay,
                    worst_delay = summary.worst_delay,
                    "Line"
                );
            }
        }
    }

    Ok(())
}

/// Runs fetch → recency filter → aggregation for one agency, degrading to
/// the embedded fallback dataset when no usable rows come back.
#[tracing::instrument(skip(agency, source), fields(agency = agency.label()))]
async fn build_report(agency: Agency, source: Option<&str>, limit: usize) -> MiseryReport {
    let rows = match load_rows(agency, source, limit).await {
        Ok(rows) if rows.is_empty() => {
            info!("Endpoint returned no rows, keeping fallback dataset");
            None
        }
        Ok(rows) => Some(filter_recent(rows, Utc::now())),
        Err(e) => {
            warn!(error = %e, "Fetch failed, keeping fallback dataset");
            None
        }
    };

    let live = rows.is_some();
    let (lines, causes) = match rows {
        Some(rows) => {
            info!(record_count = rows.len(), "Aggregating live records");
            aggregate_records(
                &rows,
                agency.fallback_lines(),
                agency.fallback_causes(),
                &agency.score_weights(),
            )
        }
        None => (agency.fallback_lines(), agency.fallback_causes()),
    };

    MiseryReport {
        generated_at: Utc::now(),
        agency: agency.label().to_string(),
        live,
        lines,
        causes,
    }
}

/// Loads delay rows from a local file path, an explicit URL, or the agency's
/// configured endpoint.
async fn load_rows(agency: Agency, source: Option<&str>, limit: usize) -> Result<Vec<RawRecord>> {
    let bytes = match source {
        Some(src) if !src.starts_with("http") => std::fs::read(src)?,
        Some(url) => fetch_from(url, limit).await?,
        None => {
            let endpoint = agency.endpoint().ok_or_else(|| {
                anyhow::anyhow!("{} publishes no open-data delay feed", agency.label())
            })?;
            fetch_from(endpoint, limit).await?
        }
    };

    parse_rows(&bytes)
}

/// Fetches rows, routing through an app-token client when one is configured.
///
/// `SOCRATA_APP_TOKEN` supplies the token; `SOCRATA_TOKEN_VIA_QUERY` sends
/// it as the `$$app_token` query parameter instead of the `X-App-Token`
/// header, for networks that strip custom headers.
#[tracing::instrument(fields(endpoint = %endpoint, limit))]
async fn fetch_from(endpoint: &str, limit: usize) -> Result<Vec<u8>> {
    match std::env::var("SOCRATA_APP_TOKEN") {
        Ok(token) if !token.is_empty() => {
            if std::env::var_os("SOCRATA_TOKEN_VIA_QUERY").is_some() {
                let client = UrlParam::socrata(BasicClient::new(), token);
                fetch_rows(&client, endpoint, limit).await
            } else {
                let client = AppToken::socrata(BasicClient::new(), token);
                fetch_rows(&client, endpoint, limit).await
            }
        }
        _ => {
            let client = BasicClient::new();
            fetch_rows(&client, endpoint, limit).await
        }
    }
}
