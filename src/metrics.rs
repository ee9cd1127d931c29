//! Aggregation of round-trip-time samples into latency statistics.
//!
//! Everything in this module is pure: the sampler hands over a finished
//! [`SampleSeries`] and gets back a [`MetricsSummary`] value record.

use clap::ValueEnum;
use serde::Serialize;

/// One probe attempt: a round-trip time in milliseconds, or a timeout.
///
/// A timeout is an explicit marker, never a NaN or negative sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Rtt(f64),
    Timeout,
}

impl Sample {
    pub fn rtt(&self) -> Option<f64> {
        match self {
            Sample::Rtt(ms) => Some(*ms),
            Sample::Timeout => None,
        }
    }
}

impl From<Option<f64>> for Sample {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(ms) => Sample::Rtt(ms),
            None => Sample::Timeout,
        }
    }
}

/// Ordered sequence of samples for one host. Insertion order is
/// chronological order.
#[derive(Debug, Clone, Default)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn push_rtt(&mut self, ms: f64) {
        self.samples.push(Sample::Rtt(ms));
    }

    pub fn push_timeout(&mut self) {
        self.samples.push(Sample::Timeout);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Non-timeout values in chronological order.
    pub fn rtts(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().filter_map(Sample::rtt)
    }
}

impl FromIterator<Option<f64>> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().map(Sample::from).collect(),
        }
    }
}

/// Which jitter definition to use. The two formulas come from two lineages
/// of this tool and give materially different numbers, so both stay
/// available; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JitterMethod {
    /// Mean of the absolute deltas between consecutive replies.
    MeanAbsDelta,
    /// Sample standard deviation (n-1) of those absolute deltas.
    DeltaStdDev,
}

/// Statistical summary of one host's sample series.
///
/// Latency fields are `None` when no reply was received; `jitter` is `None`
/// when no directly-consecutive pair of replies exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub sent: usize,
    pub loss_pct: f64,
    pub mean: Option<f64>,
    pub p95: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub jitter: Option<f64>,
}

/// Reduce a sample series to its statistical summary.
///
/// The empty series reports 100% loss (zero attempts count as total loss).
/// Loss is computed over the full series; latency statistics only over the
/// replies, in chronological order.
pub fn aggregate(series: &SampleSeries, jitter_method: JitterMethod) -> MetricsSummary {
    let sent = series.len();
    if sent == 0 {
        return MetricsSummary {
            sent: 0,
            loss_pct: 100.0,
            mean: None,
            p95: None,
            min: None,
            max: None,
            jitter: None,
        };
    }

    let replies: Vec<f64> = series.rtts().collect();
    let lost = sent - replies.len();
    let loss_pct = lost as f64 * 100.0 / sent as f64;

    if replies.is_empty() {
        return MetricsSummary {
            sent,
            loss_pct,
            mean: None,
            p95: None,
            min: None,
            max: None,
            jitter: None,
        };
    }

    let mean = replies.iter().sum::<f64>() / replies.len() as f64;
    let min = replies.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = replies.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = replies.clone();
    sorted.sort_by(f64::total_cmp);
    let p95 = percentile(&sorted, 95.0);

    let jitter = match jitter_method {
        JitterMethod::MeanAbsDelta => jitter_mean_abs_delta(series),
        JitterMethod::DeltaStdDev => jitter_delta_std_dev(series),
    };

    MetricsSummary {
        sent,
        loss_pct,
        mean: Some(mean),
        p95,
        min: Some(min),
        max: Some(max),
        jitter,
    }
}

/// Percentile over an ascending-sorted slice, linearly interpolating
/// between closest ranks. Returns `None` on an empty slice.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }
    let rank = (sorted.len() - 1) as f64 * pct / 100.0;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Absolute deltas between directly-consecutive replies. A timeout breaks
/// the pair: `[10, timeout, 20]` contributes no delta.
fn adjacent_abs_deltas(series: &SampleSeries) -> Vec<f64> {
    series
        .samples()
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Sample::Rtt(a), Sample::Rtt(b)) => Some((b - a).abs()),
            _ => None,
        })
        .collect()
}

/// Jitter as the mean absolute delta between consecutive replies.
/// `None` when no consecutive pair of replies exists.
pub fn jitter_mean_abs_delta(series: &SampleSeries) -> Option<f64> {
    let deltas = adjacent_abs_deltas(series);
    if deltas.is_empty() {
        return None;
    }
    Some(deltas.iter().sum::<f64>() / deltas.len() as f64)
}

/// Jitter as the sample standard deviation of the absolute deltas between
/// consecutive replies. Needs at least two deltas (n-1 denominator);
/// `None` otherwise.
pub fn jitter_delta_std_dev(series: &SampleSeries) -> Option<f64> {
    let deltas = adjacent_abs_deltas(series);
    if deltas.len() < 2 {
        return None;
    }
    let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
    let var = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / (deltas.len() - 1) as f64;
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[Option<f64>]) -> SampleSeries {
        values.iter().copied().collect()
    }

    #[test]
    fn test_aggregate_clean_series() {
        let s = series(&[Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(50.0)]);
        let m = aggregate(&s, JitterMethod::MeanAbsDelta);
        assert_eq!(m.sent, 5);
        assert_eq!(m.loss_pct, 0.0);
        assert_eq!(m.mean, Some(30.0));
        assert_eq!(m.min, Some(10.0));
        assert_eq!(m.max, Some(50.0));
        assert_eq!(m.jitter, Some(10.0));
    }

    #[test]
    fn test_aggregate_empty_series_is_total_loss() {
        let m = aggregate(&SampleSeries::new(), JitterMethod::MeanAbsDelta);
        assert_eq!(m.sent, 0);
        assert_eq!(m.loss_pct, 100.0);
        assert_eq!(m.mean, None);
        assert_eq!(m.p95, None);
        assert_eq!(m.jitter, None);
    }

    #[test]
    fn test_aggregate_all_timeouts() {
        let m = aggregate(&series(&[None, None, None]), JitterMethod::MeanAbsDelta);
        assert_eq!(m.sent, 3);
        assert_eq!(m.loss_pct, 100.0);
        assert_eq!(m.mean, None);
        assert_eq!(m.min, None);
        assert_eq!(m.max, None);
        assert_eq!(m.jitter, None);
    }

    #[test]
    fn test_loss_pct_is_exact() {
        let m = aggregate(
            &series(&[Some(12.0), None, Some(15.0), None]),
            JitterMethod::MeanAbsDelta,
        );
        assert_eq!(m.loss_pct, 50.0);

        let m = aggregate(&series(&[Some(1.0), None, None]), JitterMethod::MeanAbsDelta);
        assert_eq!(m.loss_pct, 100.0 * 2.0 / 3.0);
    }

    #[test]
    fn test_single_reply_has_no_jitter() {
        let m = aggregate(&series(&[Some(25.0)]), JitterMethod::MeanAbsDelta);
        assert_eq!(m.mean, Some(25.0));
        assert_eq!(m.p95, Some(25.0));
        assert_eq!(m.jitter, None);
    }

    #[test]
    fn test_timeout_breaks_jitter_pair() {
        // Two replies but no adjacent pair: jitter stays undefined.
        let s = series(&[Some(10.0), None, Some(20.0)]);
        assert_eq!(jitter_mean_abs_delta(&s), None);
        let m = aggregate(&s, JitterMethod::MeanAbsDelta);
        assert_eq!(m.jitter, None);
        assert_eq!(m.mean, Some(15.0));
    }

    #[test]
    fn test_jitter_zero_iff_constant() {
        let s = series(&[Some(30.0), Some(30.0), Some(30.0)]);
        assert_eq!(jitter_mean_abs_delta(&s), Some(0.0));

        let s = series(&[Some(30.0), Some(31.0), Some(30.0)]);
        let j = jitter_mean_abs_delta(&s).unwrap();
        assert!(j > 0.0);
    }

    #[test]
    fn test_jitter_std_dev_needs_two_deltas() {
        // One delta only: pandas would report NaN here, we report None.
        let s = series(&[Some(10.0), Some(20.0)]);
        assert_eq!(jitter_delta_std_dev(&s), None);

        // Deltas 10 and 30 -> sample std dev of [10, 30] = sqrt(200).
        let s = series(&[Some(10.0), Some(20.0), Some(50.0)]);
        let j = jitter_delta_std_dev(&s).unwrap();
        assert!((j - 200.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_methods_disagree() {
        let s = series(&[Some(10.0), Some(20.0), Some(50.0)]);
        let mean_delta = jitter_mean_abs_delta(&s).unwrap();
        let std_delta = jitter_delta_std_dev(&s).unwrap();
        assert!((mean_delta - 20.0).abs() < 1e-9);
        assert!((std_delta - mean_delta).abs() > 1.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted: Vec<f64> = (1..=100).map(|v| v as f64).collect();
        // numpy convention: p95 of 1..=100 is 95.05
        assert!((percentile(&sorted, 95.0).unwrap() - 95.05).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 100.0), Some(100.0));

        let sorted = [10.0, 20.0];
        assert_eq!(percentile(&sorted, 50.0), Some(15.0));
        assert_eq!(percentile(&[], 95.0), None);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let s = series(&[Some(10.0), None, Some(21.5), Some(19.0), None]);
        let a = aggregate(&s, JitterMethod::MeanAbsDelta);
        let b = aggregate(&s, JitterMethod::MeanAbsDelta);
        assert_eq!(a, b);
    }

    #[test]
    fn test_latency_stats_ignore_timeouts() {
        let m = aggregate(
            &series(&[None, Some(40.0), Some(60.0), None]),
            JitterMethod::MeanAbsDelta,
        );
        assert_eq!(m.loss_pct, 50.0);
        assert_eq!(m.mean, Some(50.0));
        assert_eq!(m.min, Some(40.0));
        assert_eq!(m.max, Some(60.0));
        // 40 and 60 are adjacent in the raw sequence
        assert_eq!(m.jitter, Some(20.0));
    }
}
