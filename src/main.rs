//! netgauge — network latency & stability analyzer.
//!
//! Pings a set of hosts through the OS ping utility, aggregates the
//! samples into loss/latency/jitter statistics, scores the connection,
//! and renders a console summary, an append-only CSV history, and an
//! HTML report.

mod cli;
mod config;
mod history;
mod i18n;
mod metrics;
mod probe;
mod report;
mod sampler;
mod score;

use std::path::Path;

use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use cli::Cli;
use config::RunConfig;
use history::HistoryStore;
use i18n::Msg;
use metrics::MetricsSummary;
use probe::PingProbe;
use report::{console, document, HostReport, ReportContext};
use score::{average_input, score, suitability, ScoringScheme};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("netgauge=info".parse()?),
        )
        .init();

    let args = Cli::parse();
    let cfg = RunConfig::from_cli(&args);
    let lang = cfg.lang;

    let total_secs = (cfg.ticks as f64 * cfg.interval.as_secs_f64()).round() as u64;
    println!("{}", lang.text(Msg::AppTitle));
    println!(
        "{}",
        lang.text(Msg::StartingTest)
            .replace("{duration}", &format!("{total_secs}s"))
            .replace("{hosts}", &cfg.hosts.len().to_string())
    );

    // Ctrl-C becomes a stop signal; whatever was collected so far still
    // gets aggregated and reported. The sender must outlive the run.
    let (stop_tx, mut stop_rx) = broadcast::channel(1);
    let ctrlc_tx = stop_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrlc_tx.send(());
        }
    });

    let probe = PingProbe::new(cfg.timeout);
    let run = sampler::collect(&probe, &cfg, &mut stop_rx, true).await;
    drop(stop_tx);

    println!();
    if run.interrupted {
        println!("{}", lang.text(Msg::Interrupted));
    } else {
        println!("{}", lang.text(Msg::Done));
    }
    tracing::info!("collected {} ticks across {} hosts", run.ticks_run, run.hosts.len());

    let hosts: Vec<HostReport> = run
        .hosts
        .iter()
        .map(|h| HostReport {
            host: h.host.clone(),
            summary: metrics::aggregate(&h.series, cfg.jitter_method),
            series: h.series.clone(),
        })
        .collect();

    // Total failure: no host produced a single reply. Abort before any
    // reporter runs, with a distinct exit code.
    if hosts.iter().all(|h| h.summary.mean.is_none()) {
        eprintln!("{}", lang.text(Msg::NoRtt));
        std::process::exit(1);
    }

    let summaries: Vec<MetricsSummary> = hosts.iter().map(|h| h.summary).collect();
    let overall = average_input(&summaries);
    let result = score(cfg.scheme, overall);
    let suit = (cfg.scheme == ScoringScheme::Buckets).then(|| suitability(overall));

    let run_id = Uuid::new_v4().to_string()[..8].to_string();
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

    let ctx = ReportContext {
        run_id: &run_id,
        timestamp: &timestamp,
        hosts: &hosts,
        overall,
        result,
        suitability: suit,
        lang,
        ping_alert: cfg.ping_alert,
        interval_secs: cfg.interval.as_secs_f64(),
    };

    console::print_summary(&ctx);

    let store = HistoryStore::new(&cfg.history_path);
    let named: Vec<(String, MetricsSummary)> = hosts
        .iter()
        .map(|h| (h.host.name.clone(), h.summary))
        .collect();
    store.append(&history::build_rows(&run_id, &timestamp, &named, result.score))?;
    println!(
        "{}",
        lang.text(Msg::HistorySaved)
            .replace("{path}", &store.path().display().to_string())
    );

    let overall_history = store.overall_rows()?;
    document::write_report(&cfg.output, &ctx, &overall_history)?;
    println!(
        "{}",
        lang.text(Msg::ReportReady)
            .replace("{path}", &cfg.output.display().to_string())
    );

    if !cfg.headless {
        open_report(&cfg.output);
    }

    Ok(())
}

/// Open the generated report with the platform opener; failure is not an
/// error, the file path was already printed.
fn open_report(path: &Path) {
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn();
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(path).spawn();
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(path).spawn();

    if let Err(err) = result {
        tracing::debug!("could not open report: {err}");
    }
}
