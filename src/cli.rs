//! Command-line surface.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use regex::Regex;

use crate::i18n::Lang;
use crate::metrics::JitterMethod;
use crate::score::ScoringScheme;

#[derive(Debug, Parser)]
#[command(
    name = "netgauge",
    version,
    about = "Network latency & stability analyzer: pings a set of hosts, scores the connection, and renders console/CSV/HTML reports."
)]
pub struct Cli {
    /// Test duration, e.g. "60s", "30m", "2h" (a bare number means seconds)
    #[arg(long, conflicts_with = "count")]
    pub duration: Option<String>,

    /// Number of probes per host instead of a duration
    #[arg(long)]
    pub count: Option<usize>,

    /// Seconds between probe ticks
    #[arg(long, default_value_t = 1.0)]
    pub interval: f64,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    pub timeout: f64,

    /// Extra hosts as "Name=address,Name2=address2" (Google and Cloudflare
    /// are always included)
    #[arg(long)]
    pub hosts: Option<String>,

    /// Scoring scheme
    #[arg(long, value_enum, default_value_t = ScoringScheme::Buckets)]
    pub scheme: ScoringScheme,

    /// Jitter definition
    #[arg(long, value_enum, default_value_t = JitterMethod::MeanAbsDelta)]
    pub jitter_method: JitterMethod,

    /// Mean-latency alert threshold in ms, highlighted in reports
    #[arg(long, default_value_t = 80.0)]
    pub ping_alert: f64,

    /// Report language
    #[arg(long, value_enum, default_value_t = Lang::Pt)]
    pub lang: Lang,

    /// HTML report output path
    #[arg(long, default_value = "netgauge-report.html")]
    pub output: PathBuf,

    /// History CSV path (defaults to netgauge-history.csv;
    /// NETGAUGE_HISTORY_PATH overrides the default)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Do not open the report when done (cron-friendly)
    #[arg(long)]
    pub headless: bool,

    /// Animated spinner on the overall progress bar
    #[arg(long)]
    pub fancy: bool,
}

/// Parse a human duration like "60s", "30m", "2h" or "45" (seconds).
/// Unparseable input falls back to 60 seconds, as the interactive default.
pub fn parse_duration_secs(raw: &str) -> u64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(\d+)\s*([hms])?$").unwrap());

    let raw = raw.trim().to_lowercase();
    let Some(caps) = re.captures(&raw) else {
        return 60;
    };
    let value: u64 = match caps[1].parse() {
        Ok(v) => v,
        Err(_) => return 60,
    };
    match caps.get(2).map(|m| m.as_str()) {
        Some("h") => value * 3600,
        Some("m") => value * 60,
        _ => value,
    }
}

/// Parse "Name=address,Name2=address2" into (name, address) pairs.
/// Malformed items are skipped.
pub fn parse_host_list(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|item| {
            let (name, address) = item.split_once('=')?;
            let name = name.trim();
            let address = address.trim();
            if name.is_empty() || address.is_empty() {
                None
            } else {
                Some((name.to_string(), address.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_secs("60s"), 60);
        assert_eq!(parse_duration_secs("30m"), 1800);
        assert_eq!(parse_duration_secs("2h"), 7200);
        assert_eq!(parse_duration_secs("45"), 45);
        assert_eq!(parse_duration_secs(" 10 m "), 600);
        assert_eq!(parse_duration_secs(""), 60);
        assert_eq!(parse_duration_secs("soon"), 60);
    }

    #[test]
    fn test_parse_host_list() {
        let hosts = parse_host_list("DNS=9.9.9.9, Router = 192.168.0.1");
        assert_eq!(
            hosts,
            vec![
                ("DNS".to_string(), "9.9.9.9".to_string()),
                ("Router".to_string(), "192.168.0.1".to_string()),
            ]
        );

        assert!(parse_host_list("no-equals-here").is_empty());
        assert!(parse_host_list("=addr, name=").is_empty());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
