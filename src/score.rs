//! Stability scoring: two coexisting strategies over loss/ping/jitter.
//!
//! Scheme A ("buckets") maps each metric to a discrete sub-score and takes
//! a weighted composite on a 0-10 scale, with an independent raw-threshold
//! verdict and per-use-case suitability flags. Scheme B ("penalty") starts
//! at 100 and subtracts continuous loss and log-jitter penalties. They
//! encode different product intents and are both kept, selectable by
//! configuration.

use clap::ValueEnum;
use serde::Serialize;

use crate::metrics::MetricsSummary;

/// Latency/jitter/loss thresholds the bucket sub-scores and verdicts hang off.
#[derive(Debug, Clone, Copy)]
pub struct Baselines {
    pub ping_good: f64,
    pub ping_ok: f64,
    pub ping_reg: f64,
    pub jitter_good: f64,
    pub jitter_ok: f64,
    pub jitter_reg: f64,
    pub loss_ok: f64,
    pub loss_reg: f64,
}

pub const BASE: Baselines = Baselines {
    ping_good: 30.0,
    ping_ok: 50.0,
    ping_reg: 100.0,
    jitter_good: 5.0,
    jitter_ok: 10.0,
    jitter_reg: 20.0,
    loss_ok: 1.0,
    loss_reg: 3.0,
};

/// Worst-case substitute for an undefined mean or jitter (all-timeout run).
/// Undefined values must never reach the score arithmetic as NaN.
pub const NO_DATA_MS: f64 = 999.0;

/// Worst-case substitute for loss when no host reported anything.
pub const NO_DATA_LOSS_PCT: f64 = 100.0;

/// Scoring strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScheme {
    /// Weighted discrete buckets, composite on a 0-10 scale.
    Buckets,
    /// Continuous penalty model, 0-100 scale.
    Penalty,
}

/// Raw scoring input with the undefined-data policy already applied:
/// every field is a defined number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreInput {
    pub loss_pct: f64,
    pub ping_ms: f64,
    pub jitter_ms: f64,
}

impl ScoreInput {
    /// Single-host input; undefined mean/jitter become the worst-case
    /// sentinel.
    pub fn from_summary(summary: &MetricsSummary) -> Self {
        Self {
            loss_pct: summary.loss_pct,
            ping_ms: summary.mean.unwrap_or(NO_DATA_MS),
            jitter_ms: summary.jitter.unwrap_or(NO_DATA_MS),
        }
    }
}

/// Average several host summaries into one scoring input. Undefined fields
/// are skipped from the averages; when no host has a defined value the
/// worst-case sentinel is used instead.
pub fn average_input(summaries: &[MetricsSummary]) -> ScoreInput {
    fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
        let collected: Vec<f64> = values.collect();
        if collected.is_empty() {
            None
        } else {
            Some(collected.iter().sum::<f64>() / collected.len() as f64)
        }
    }

    let loss = mean_of(summaries.iter().map(|m| m.loss_pct)).unwrap_or(NO_DATA_LOSS_PCT);
    let ping = mean_of(summaries.iter().filter_map(|m| m.mean)).unwrap_or(NO_DATA_MS);
    let jitter = mean_of(summaries.iter().filter_map(|m| m.jitter)).unwrap_or(NO_DATA_MS);

    ScoreInput {
        loss_pct: loss,
        ping_ms: ping,
        jitter_ms: jitter,
    }
}

/// Discrete verdict over either scheme's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    // Scheme A, from raw thresholds
    Stable,
    MinorOscillation,
    Unstable,
    // Scheme B, from score bands
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

/// Bounded score plus verdict. Recomputed fresh for every report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub scheme: ScoringScheme,
    pub score: f64,
    pub scale_max: f64,
    pub verdict: Verdict,
}

/// Per-use-case adequacy flags derived from raw loss/ping/jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuitabilityAssessment {
    pub streaming: bool,
    pub video_call: bool,
    pub gaming: bool,
}

/// Score an input under the selected scheme.
pub fn score(scheme: ScoringScheme, input: ScoreInput) -> ScoreResult {
    match scheme {
        ScoringScheme::Buckets => {
            let composite = weighted_bucket_score(input);
            ScoreResult {
                scheme,
                score: composite,
                scale_max: 10.0,
                verdict: bucket_verdict(input),
            }
        }
        ScoringScheme::Penalty => {
            let (value, verdict) = stability_score(input.loss_pct, input.jitter_ms);
            ScoreResult {
                scheme,
                score: value,
                scale_max: 100.0,
                verdict,
            }
        }
    }
}

// --- Scheme A: weighted discrete buckets ---

pub fn ping_subscore(ping_ms: f64) -> f64 {
    if ping_ms <= BASE.ping_good {
        10.0
    } else if ping_ms <= BASE.ping_ok {
        8.0
    } else if ping_ms <= BASE.ping_reg {
        6.0
    } else if ping_ms <= 200.0 {
        3.0
    } else {
        1.0
    }
}

pub fn jitter_subscore(jitter_ms: f64) -> f64 {
    if jitter_ms <= BASE.jitter_good {
        10.0
    } else if jitter_ms <= BASE.jitter_ok {
        8.0
    } else if jitter_ms <= BASE.jitter_reg {
        6.0
    } else {
        1.0
    }
}

pub fn loss_subscore(loss_pct: f64) -> f64 {
    if loss_pct == 0.0 {
        10.0
    } else if loss_pct <= BASE.loss_ok {
        8.0
    } else if loss_pct <= BASE.loss_reg {
        6.0
    } else {
        1.0
    }
}

/// Composite 0.4*ping + 0.3*jitter + 0.3*loss, range [1, 10].
pub fn weighted_bucket_score(input: ScoreInput) -> f64 {
    0.4 * ping_subscore(input.ping_ms)
        + 0.3 * jitter_subscore(input.jitter_ms)
        + 0.3 * loss_subscore(input.loss_pct)
}

/// Verdict from raw thresholds, independent of the composite.
pub fn bucket_verdict(input: ScoreInput) -> Verdict {
    if input.loss_pct > BASE.loss_reg
        || input.ping_ms > BASE.ping_reg
        || input.jitter_ms > BASE.jitter_reg
    {
        Verdict::Unstable
    } else if input.loss_pct > BASE.loss_ok
        || input.ping_ms > BASE.ping_ok
        || input.jitter_ms > BASE.jitter_ok
    {
        Verdict::MinorOscillation
    } else {
        Verdict::Stable
    }
}

/// Use-case adequacy from raw loss/ping/jitter. Gaming is the strictest
/// set of thresholds, streaming the loosest.
pub fn suitability(input: ScoreInput) -> SuitabilityAssessment {
    let ScoreInput {
        loss_pct,
        ping_ms,
        jitter_ms,
    } = input;
    SuitabilityAssessment {
        streaming: loss_pct < 1.0 && ping_ms < 100.0 && jitter_ms < 30.0,
        video_call: loss_pct < 1.0 && ping_ms < 80.0 && jitter_ms < 20.0,
        gaming: loss_pct < 1.0 && ping_ms < 40.0 && jitter_ms < 10.0,
    }
}

// --- Scheme B: continuous penalty ---

const LOSS_WEIGHT: f64 = 2.2;
const JITTER_WEIGHT: f64 = 9.0;

/// Continuous stability score: start at 100, subtract a linear loss
/// penalty and a log-scale jitter penalty, clamp to [0, 100].
pub fn stability_score(loss_pct: f64, jitter_ms: f64) -> (f64, Verdict) {
    let mut value = 100.0;
    value -= LOSS_WEIGHT * loss_pct;
    value -= JITTER_WEIGHT * jitter_ms.max(0.0).ln_1p();
    value = value.clamp(0.0, 100.0);

    let verdict = if value >= 90.0 {
        Verdict::Excellent
    } else if value >= 80.0 {
        Verdict::Good
    } else if value >= 65.0 {
        Verdict::Fair
    } else if value >= 45.0 {
        Verdict::Poor
    } else {
        Verdict::VeryPoor
    };
    (value, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{aggregate, JitterMethod, SampleSeries};

    fn input(loss: f64, ping: f64, jitter: f64) -> ScoreInput {
        ScoreInput {
            loss_pct: loss,
            ping_ms: ping,
            jitter_ms: jitter,
        }
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(ping_subscore(30.0), 10.0);
        assert_eq!(ping_subscore(30.1), 8.0);
        assert_eq!(ping_subscore(50.0), 8.0);
        assert_eq!(ping_subscore(100.0), 6.0);
        assert_eq!(ping_subscore(200.0), 3.0);
        assert_eq!(ping_subscore(201.0), 1.0);

        assert_eq!(jitter_subscore(5.0), 10.0);
        assert_eq!(jitter_subscore(10.0), 8.0);
        assert_eq!(jitter_subscore(20.0), 6.0);
        assert_eq!(jitter_subscore(20.1), 1.0);

        assert_eq!(loss_subscore(0.0), 10.0);
        assert_eq!(loss_subscore(0.5), 8.0);
        assert_eq!(loss_subscore(3.0), 6.0);
        assert_eq!(loss_subscore(3.5), 1.0);
    }

    #[test]
    fn test_composite_bounds() {
        let best = weighted_bucket_score(input(0.0, 1.0, 0.0));
        assert_eq!(best, 10.0);
        let worst = weighted_bucket_score(input(100.0, 999.0, 999.0));
        assert_eq!(worst, 1.0);
    }

    #[test]
    fn test_all_timeout_run_scores_one() {
        // 3 timeouts: loss 100%, ping/jitter undefined -> sentinel 999,
        // all sub-scores land in the worst bucket.
        let series: SampleSeries = [None, None, None].into_iter().collect();
        let summary = aggregate(&series, JitterMethod::MeanAbsDelta);
        let i = ScoreInput::from_summary(&summary);
        assert_eq!(i.ping_ms, NO_DATA_MS);
        assert_eq!(i.jitter_ms, NO_DATA_MS);
        assert_eq!(weighted_bucket_score(i), 1.0);
    }

    #[test]
    fn test_bucket_verdict_thresholds() {
        assert_eq!(bucket_verdict(input(0.0, 20.0, 3.0)), Verdict::Stable);
        assert_eq!(
            bucket_verdict(input(0.0, 60.0, 3.0)),
            Verdict::MinorOscillation
        );
        assert_eq!(bucket_verdict(input(2.0, 20.0, 3.0)), Verdict::MinorOscillation);
        assert_eq!(bucket_verdict(input(4.0, 20.0, 3.0)), Verdict::Unstable);
        assert_eq!(bucket_verdict(input(0.0, 150.0, 3.0)), Verdict::Unstable);
        assert_eq!(bucket_verdict(input(0.0, 20.0, 25.0)), Verdict::Unstable);
    }

    #[test]
    fn test_suitability_monotonic() {
        // Gaming is strictly more demanding: whatever passes gaming must
        // pass the other two.
        let candidates = [
            input(0.0, 10.0, 2.0),
            input(0.5, 39.0, 9.0),
            input(0.9, 35.0, 5.0),
            input(0.0, 90.0, 25.0),
            input(2.0, 30.0, 5.0),
        ];
        for c in candidates {
            let s = suitability(c);
            if s.gaming {
                assert!(s.video_call, "gaming ok but video-call not: {:?}", c);
                assert!(s.streaming, "gaming ok but streaming not: {:?}", c);
            }
            if s.video_call {
                assert!(s.streaming, "video-call ok but streaming not: {:?}", c);
            }
        }
    }

    #[test]
    fn test_suitability_thresholds() {
        let s = suitability(input(0.5, 70.0, 15.0));
        assert!(s.streaming);
        assert!(s.video_call);
        assert!(!s.gaming);

        let s = suitability(input(1.5, 30.0, 5.0));
        assert!(!s.streaming);
        assert!(!s.video_call);
        assert!(!s.gaming);
    }

    #[test]
    fn test_stability_score_perfect_is_excellent() {
        let (value, verdict) = stability_score(0.0, 0.0);
        assert!(value >= 90.0 && value <= 100.0);
        assert_eq!(verdict, Verdict::Excellent);
    }

    #[test]
    fn test_stability_score_monotonic() {
        let (base, _) = stability_score(0.0, 0.0);
        let (lossy, _) = stability_score(50.0, 10.0);
        assert!(lossy < base);

        // increasing either input never increases the score
        let mut prev = f64::INFINITY;
        for loss in [0.0, 1.0, 5.0, 20.0, 100.0] {
            let (v, _) = stability_score(loss, 5.0);
            assert!(v <= prev);
            prev = v;
        }
        let mut prev = f64::INFINITY;
        for jitter in [0.0, 2.0, 10.0, 50.0, 999.0] {
            let (v, _) = stability_score(1.0, jitter);
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn test_stability_score_clamped() {
        let (v, verdict) = stability_score(100.0, 999.0);
        assert_eq!(v, 0.0);
        assert_eq!(verdict, Verdict::VeryPoor);

        let (v, _) = stability_score(-5.0, 0.0);
        assert_eq!(v, 100.0);
    }

    #[test]
    fn test_stability_bands() {
        // loss-only inputs pin the score to 100 - 2.2 * loss
        let (v, verdict) = stability_score(5.0, 0.0);
        assert!((v - 89.0).abs() < 1e-9);
        assert_eq!(verdict, Verdict::Good);

        let (v, verdict) = stability_score(10.0, 0.0);
        assert!((v - 78.0).abs() < 1e-9);
        assert_eq!(verdict, Verdict::Fair);

        let (v, verdict) = stability_score(20.0, 0.0);
        assert!((v - 56.0).abs() < 1e-9);
        assert_eq!(verdict, Verdict::Poor);

        let (v, verdict) = stability_score(30.0, 0.0);
        assert!((v - 34.0).abs() < 1e-9);
        assert_eq!(verdict, Verdict::VeryPoor);
    }

    #[test]
    fn test_score_dispatch() {
        let r = score(ScoringScheme::Buckets, input(0.0, 20.0, 3.0));
        assert_eq!(r.scale_max, 10.0);
        assert_eq!(r.score, 10.0);
        assert_eq!(r.verdict, Verdict::Stable);

        let r = score(ScoringScheme::Penalty, input(0.0, 20.0, 0.0));
        assert_eq!(r.scale_max, 100.0);
        assert_eq!(r.verdict, Verdict::Excellent);
    }

    #[test]
    fn test_average_input_skips_undefined() {
        let series_ok: SampleSeries = [Some(10.0), Some(20.0), Some(30.0)].into_iter().collect();
        let series_dead: SampleSeries = [None, None].into_iter().collect();
        let a = aggregate(&series_ok, JitterMethod::MeanAbsDelta);
        let b = aggregate(&series_dead, JitterMethod::MeanAbsDelta);

        let avg = average_input(&[a, b]);
        // loss averages over all hosts, latency only over defined ones
        assert_eq!(avg.loss_pct, 50.0);
        assert_eq!(avg.ping_ms, 20.0);
        assert_eq!(avg.jitter_ms, 10.0);

        let avg = average_input(&[b]);
        assert_eq!(avg.ping_ms, NO_DATA_MS);
        assert_eq!(avg.jitter_ms, NO_DATA_MS);

        let avg = average_input(&[]);
        assert_eq!(avg.loss_pct, NO_DATA_LOSS_PCT);
    }
}
