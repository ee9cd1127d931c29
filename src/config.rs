//! Run configuration assembled from CLI arguments and environment overrides.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{parse_duration_secs, parse_host_list, Cli};
use crate::i18n::Lang;
use crate::metrics::JitterMethod;
use crate::score::ScoringScheme;

/// Default history file, overridable via `NETGAUGE_HISTORY_PATH` or
/// `--history`.
const DEFAULT_HISTORY_PATH: &str = "netgauge-history.csv";

/// Hosts tracked on every run; extras from `--hosts` are appended.
const DEFAULT_HOSTS: &[(&str, &str)] = &[
    ("Google (8.8.8.8)", "8.8.8.8"),
    ("Cloudflare (1.1.1.1)", "1.1.1.1"),
];

/// One tracked host: a display name and a pingable address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub hosts: Vec<HostSpec>,
    /// Number of probe ticks; each tick probes every host once.
    pub ticks: usize,
    pub interval: Duration,
    pub timeout: Duration,
    pub scheme: ScoringScheme,
    pub jitter_method: JitterMethod,
    pub ping_alert: f64,
    pub lang: Lang,
    pub output: PathBuf,
    pub history_path: PathBuf,
    pub headless: bool,
    pub fancy: bool,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let interval = if cli.interval > 0.0 { cli.interval } else { 1.0 };
        let timeout = if cli.timeout > 0.0 { cli.timeout } else { 5.0 };

        let ticks = match cli.count {
            Some(count) => count.max(1),
            None => {
                let duration = parse_duration_secs(cli.duration.as_deref().unwrap_or("60s"));
                (duration as f64 / interval).ceil().max(1.0) as usize
            }
        };

        let mut hosts: Vec<HostSpec> = DEFAULT_HOSTS
            .iter()
            .map(|(name, address)| HostSpec {
                name: (*name).to_string(),
                address: (*address).to_string(),
            })
            .collect();
        if let Some(raw) = &cli.hosts {
            for (name, address) in parse_host_list(raw) {
                hosts.push(HostSpec { name, address });
            }
        }

        let history_path = cli
            .history
            .clone()
            .or_else(|| env::var("NETGAUGE_HISTORY_PATH").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH));

        Self {
            hosts,
            ticks,
            interval: Duration::from_secs_f64(interval),
            timeout: Duration::from_secs_f64(timeout),
            scheme: cli.scheme,
            jitter_method: cli.jitter_method,
            ping_alert: cli.ping_alert,
            lang: cli.lang,
            output: cli.output.clone(),
            history_path,
            headless: cli.headless,
            fancy: cli.fancy,
        }
    }
}
