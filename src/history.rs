//! Append-only CSV history of past runs.
//!
//! One row per host per run plus a synthetic OVERALL row. The file is
//! never rewritten: new runs append, old rows stay byte-identical. Reads
//! tolerate rows written by older versions with fewer columns.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::MetricsSummary;
use crate::score::{average_input, ScoreInput};

/// Host label of the synthetic aggregate row.
pub const OVERALL_HOST: &str = "OVERALL";

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history encoding error: {0}")]
    Csv(#[from] csv::Error),
}

/// One persisted row. Latency fields are empty when undefined; columns
/// added later must default on rows that predate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub test_id: String,
    pub timestamp: String,
    pub host: String,
    pub loss_pct: f64,
    #[serde(default)]
    pub mean_ms: Option<f64>,
    #[serde(default)]
    pub p95_ms: Option<f64>,
    #[serde(default)]
    pub min_ms: Option<f64>,
    #[serde(default)]
    pub max_ms: Option<f64>,
    #[serde(default)]
    pub jitter_ms: Option<f64>,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

/// Append-only store over one CSV file. The path is configuration, not a
/// global constant, so tests and deployments can point it anywhere.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one run's rows. The header is written only when the file is
    /// new or empty.
    pub fn append(&self, rows: &[HistoryRow]) -> Result<(), HistoryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// All rows, oldest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryRow>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// OVERALL rows only, oldest first — the input of the history trend
    /// panel.
    pub fn overall_rows(&self) -> Result<Vec<HistoryRow>, HistoryError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.host == OVERALL_HOST)
            .collect())
    }
}

/// Build one run's rows: one per host plus the OVERALL aggregate, in host
/// order.
pub fn build_rows(
    test_id: &str,
    timestamp: &str,
    summaries: &[(String, MetricsSummary)],
    overall_score: f64,
) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = summaries
        .iter()
        .map(|(host, m)| HistoryRow {
            test_id: test_id.to_string(),
            timestamp: timestamp.to_string(),
            host: host.clone(),
            loss_pct: m.loss_pct,
            mean_ms: m.mean,
            p95_ms: m.p95,
            min_ms: m.min,
            max_ms: m.max,
            jitter_ms: m.jitter,
            overall_score: Some(overall_score),
        })
        .collect();

    let metrics: Vec<MetricsSummary> = summaries.iter().map(|(_, m)| *m).collect();
    let ScoreInput {
        loss_pct,
        ping_ms,
        jitter_ms,
    } = average_input(&metrics);
    // The averaged mean/jitter stay empty when no host had data; the
    // sentinel is a scoring device, not a measurement.
    let any_mean = metrics.iter().any(|m| m.mean.is_some());
    let any_jitter = metrics.iter().any(|m| m.jitter.is_some());

    rows.push(HistoryRow {
        test_id: test_id.to_string(),
        timestamp: timestamp.to_string(),
        host: OVERALL_HOST.to_string(),
        loss_pct,
        mean_ms: any_mean.then_some(ping_ms),
        p95_ms: None,
        min_ms: None,
        max_ms: None,
        jitter_ms: any_jitter.then_some(jitter_ms),
        overall_score: Some(overall_score),
    });

    rows
}
