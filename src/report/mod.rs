//! Reporters: console summary and HTML document.
//!
//! Reporters only consume plain value records (summaries, score results,
//! series) assembled into a [`ReportContext`]; nothing here feeds back
//! into sampling or scoring.

pub mod console;
pub mod document;

use thiserror::Error;

use crate::config::HostSpec;
use crate::i18n::Lang;
use crate::metrics::{MetricsSummary, SampleSeries};
use crate::score::{ScoreInput, ScoreResult, SuitabilityAssessment};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// One host's collected series plus its summary.
#[derive(Debug, Clone)]
pub struct HostReport {
    pub host: HostSpec,
    pub summary: MetricsSummary,
    pub series: SampleSeries,
}

/// Everything a reporter needs for one run.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub run_id: &'a str,
    pub timestamp: &'a str,
    pub hosts: &'a [HostReport],
    /// Averaged raw metrics across hosts, sentinel-substituted.
    pub overall: ScoreInput,
    pub result: ScoreResult,
    /// Only present under the buckets scheme.
    pub suitability: Option<SuitabilityAssessment>,
    pub lang: Lang,
    pub ping_alert: f64,
    pub interval_secs: f64,
}

/// Format an optional metric, rendering undefined values as a placeholder
/// instead of ever panicking or printing NaN.
pub fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(12.345)), "12.35");
        assert_eq!(fmt_opt(None), "—");
    }
}
