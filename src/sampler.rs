//! Sampling loop: paced probe ticks across all tracked hosts.
//!
//! Each tick issues one probe per host, all concurrently, then waits for
//! the next tick boundary. Slow probes are capped so one sluggish host
//! cannot stall the cadence. A stop signal (Ctrl-C) ends the loop early;
//! whatever was collected so far still gets aggregated and reported.

use std::time::Duration;

use futures::future::join_all;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use crate::config::{HostSpec, RunConfig};
use crate::metrics::SampleSeries;
use crate::probe::ProbeSource;

/// One host's collected series.
#[derive(Debug, Clone)]
pub struct HostSamples {
    pub host: HostSpec,
    pub series: SampleSeries,
}

/// Everything a run collected, host order preserved.
#[derive(Debug, Clone)]
pub struct RunSamples {
    pub hosts: Vec<HostSamples>,
    pub ticks_run: usize,
    pub interrupted: bool,
}

/// Bar colors cycled per host, in the order hosts were configured.
const BAR_COLORS: &[&str] = &["blue", "yellow", "green", "magenta", "cyan", "red", "white"];

/// Drive the probe loop until `cfg.ticks` ticks have run or a stop signal
/// arrives. The caller must keep the matching sender alive for the whole
/// run; any resolution of `stop_rx` is treated as a stop request.
pub async fn collect<P: ProbeSource>(
    probe: &P,
    cfg: &RunConfig,
    stop_rx: &mut broadcast::Receiver<()>,
    show_progress: bool,
) -> RunSamples {
    let mut hosts: Vec<HostSamples> = cfg
        .hosts
        .iter()
        .map(|host| HostSamples {
            host: host.clone(),
            series: SampleSeries::new(),
        })
        .collect();
    // Warn only once per host when ping itself cannot be invoked.
    let mut unavailable_warned = vec![false; hosts.len()];

    let progress = if show_progress {
        Some(Progress::new(cfg, &hosts))
    } else {
        None
    };

    // Probes are already bounded by the ping timeout; the extra margin
    // only catches a wedged process.
    let cap = cfg.timeout + Duration::from_millis(500);

    let mut interval = tokio::time::interval(cfg.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut interrupted = false;
    let mut ticks_run = 0;

    for _ in 0..cfg.ticks {
        tokio::select! {
            biased;
            _ = stop_rx.recv() => {
                interrupted = true;
            }
            _ = interval.tick() => {}
        }
        if interrupted {
            break;
        }

        // Issue every host's probe for this tick before consuming any
        // result; per-host order stays chronological because ticks are
        // strictly sequential.
        let probes = hosts.iter().map(|h| {
            let address = h.host.address.clone();
            async move { tokio::time::timeout(cap, probe.probe(&address)).await }
        });
        let outcomes = join_all(probes).await;

        for (idx, outcome) in outcomes.into_iter().enumerate() {
            let sample = match outcome {
                Ok(Ok(sample)) => sample,
                Ok(Err(err)) => {
                    if !unavailable_warned[idx] {
                        tracing::warn!(
                            "probe unavailable for {}: {}",
                            hosts[idx].host.name,
                            err
                        );
                        unavailable_warned[idx] = true;
                    }
                    None
                }
                Err(_elapsed) => None,
            };
            match sample {
                Some(ms) => hosts[idx].series.push_rtt(ms),
                None => hosts[idx].series.push_timeout(),
            }
            if let Some(p) = &progress {
                p.update_host(idx, sample);
            }
        }

        ticks_run += 1;
        if let Some(p) = &progress {
            p.tick();
        }
    }

    if let Some(p) = progress {
        p.finish();
    }

    RunSamples {
        hosts,
        ticks_run,
        interrupted,
    }
}

/// Live progress: one overall bar plus one colored bar per host showing
/// the latest sample.
struct Progress {
    _multi: MultiProgress,
    overall: ProgressBar,
    per_host: Vec<ProgressBar>,
}

impl Progress {
    fn new(cfg: &RunConfig, hosts: &[HostSamples]) -> Self {
        let multi = MultiProgress::new();

        let overall = multi.add(ProgressBar::new(cfg.ticks as u64));
        let overall_template = if cfg.fancy {
            "{spinner:.cyan} {prefix:>20.cyan.bold} {bar:30.cyan} {percent:>3}%"
        } else {
            "  {prefix:>20.cyan.bold} {bar:30.cyan} {percent:>3}%"
        };
        overall.set_style(
            ProgressStyle::with_template(overall_template)
                .unwrap()
                .progress_chars("▓░"),
        );
        overall.set_prefix("total");
        if cfg.fancy {
            overall.enable_steady_tick(Duration::from_millis(80));
        }

        let name_width = hosts
            .iter()
            .map(|h| h.host.name.len())
            .max()
            .unwrap_or(0)
            .max(18);
        let per_host = hosts
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let color = BAR_COLORS[i % BAR_COLORS.len()];
                let pb = multi.add(ProgressBar::new(cfg.ticks as u64));
                pb.set_style(
                    ProgressStyle::with_template(&format!(
                        "  {{prefix:>{name_width}.{color}.bold}} {{msg:>10}} {{bar:28.{color}}} {{percent:>3}}%"
                    ))
                    .unwrap()
                    .progress_chars("▓░"),
                );
                pb.set_prefix(h.host.name.clone());
                pb
            })
            .collect();

        Self {
            _multi: multi,
            overall,
            per_host,
        }
    }

    fn update_host(&self, idx: usize, sample: Option<f64>) {
        let pb = &self.per_host[idx];
        pb.set_message(match sample {
            Some(ms) => format!("{ms:.1} ms"),
            None => "timeout".to_string(),
        });
        pb.inc(1);
    }

    fn tick(&self) {
        self.overall.inc(1);
    }

    fn finish(self) {
        for pb in &self.per_host {
            pb.finish();
        }
        self.overall.finish();
    }
}
