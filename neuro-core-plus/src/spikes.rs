//! Spike detection and firing statistics on sampled traces.

use neuro_core::Trace;
use serde::Serialize;

use crate::error::{PlusError, PlusResult};

/// Upward crossings of `threshold`, with times linearly interpolated between samples.
pub fn detect_spikes(time: &[f64], signal: &[f64], threshold: f64) -> Vec<f64> {
    debug_assert_eq!(time.len(), signal.len());
    let mut spikes = Vec::new();
    for i in 1..signal.len().min(time.len()) {
        let (s0, s1) = (signal[i - 1], signal[i]);
        if s0 < threshold && s1 >= threshold {
            // s1 > s0 here, so the slope is non-zero
            let frac = (threshold - s0) / (s1 - s0);
            spikes.push(time[i - 1] + frac * (time[i] - time[i - 1]));
        }
    }
    spikes
}

/// Summary of a spike train. Rates assume the time base is milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpikeStats {
    pub count: usize,
    /// Mean inter-spike interval; `None` with fewer than two spikes.
    pub mean_isi: Option<f64>,
    pub firing_rate_hz: f64,
    /// Coefficient of variation of the inter-spike intervals.
    pub cv: Option<f64>,
}

impl SpikeStats {
    pub fn from_spike_times(times: &[f64]) -> Self {
        let isis: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
        if isis.is_empty() {
            return Self { count: times.len(), mean_isi: None, firing_rate_hz: 0.0, cv: None };
        }
        let n = isis.len() as f64;
        let mean = isis.iter().sum::<f64>() / n;
        let var = isis.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let (rate, cv) = if mean > 0.0 { (1000.0 / mean, Some(var.sqrt() / mean)) } else { (0.0, None) };
        Self { count: times.len(), mean_isi: Some(mean), firing_rate_hz: rate, cv }
    }

    /// Spike statistics of `variable`. Models that reset on firing report their own
    /// spike times; everything else is thresholded.
    pub fn from_trace(trace: &Trace, variable: &str, threshold: f64) -> PlusResult<Self> {
        Ok(Self::from_spike_times(&spike_times(trace, variable, threshold)?))
    }
}

/// Spike times of a trace. Recorded resets belong to the first state variable and are used
/// for it when present; any other variable is thresholded.
pub fn spike_times(trace: &Trace, variable: &str, threshold: f64) -> PlusResult<Vec<f64>> {
    let signal = trace
        .variable(variable)
        .ok_or_else(|| PlusError::UnknownVariable(variable.to_string()))?;
    let resets_apply = trace.names.first().is_some_and(|&first| first == variable);
    if resets_apply && !trace.spikes.is_empty() {
        return Ok(trace.spikes.clone());
    }
    Ok(detect_spikes(&trace.time, signal, threshold))
}

/// `(min, max)` of `signal` over samples at or after `skip_until`.
pub fn envelope(time: &[f64], signal: &[f64], skip_until: f64) -> Option<(f64, f64)> {
    time.iter()
        .zip(signal)
        .filter(|(t, _)| **t >= skip_until)
        .map(|(_, &x)| x)
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_crossing_times() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let v = [-1.0, 1.0, 2.0, -1.0, 0.0];
        let spikes = detect_spikes(&t, &v, 0.0);
        // first crossing halfway between 0 and 1, second exactly at t=4
        assert_eq!(spikes, vec![0.5, 4.0]);
    }

    #[test]
    fn no_spikes_when_never_crossing() {
        assert!(detect_spikes(&[0.0, 1.0], &[5.0, 6.0], 0.0).is_empty());
        assert!(detect_spikes(&[], &[], 0.0).is_empty());
    }

    #[test]
    fn stats_from_regular_train() {
        let s = SpikeStats::from_spike_times(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean_isi, Some(10.0));
        assert!((s.firing_rate_hz - 100.0).abs() < 1e-9);
        assert_eq!(s.cv, Some(0.0));
    }

    #[test]
    fn stats_with_single_spike() {
        let s = SpikeStats::from_spike_times(&[3.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean_isi, None);
        assert_eq!(s.firing_rate_hz, 0.0);
    }

    #[test]
    fn recorded_resets_take_precedence() {
        let mut tr = Trace::with_capacity(&["V"], 3);
        tr.push(0.0, &[-1.0]);
        tr.push(1.0, &[1.0]);
        tr.push(2.0, &[-1.0]);
        assert_eq!(spike_times(&tr, "V", 0.0).unwrap(), vec![0.5]);
        tr.spikes = vec![1.7];
        assert_eq!(spike_times(&tr, "V", 0.0).unwrap(), vec![1.7]);
        assert!(matches!(spike_times(&tr, "W", 0.0), Err(PlusError::UnknownVariable(_))));
    }

    #[test]
    fn resets_only_stand_in_for_the_first_variable() {
        let mut tr = Trace::with_capacity(&["V", "U"], 3);
        tr.push(0.0, &[-1.0, -1.0]);
        tr.push(1.0, &[-1.0, 3.0]);
        tr.push(2.0, &[-1.0, -1.0]);
        tr.spikes = vec![0.4, 1.6];
        assert_eq!(spike_times(&tr, "V", 0.0).unwrap(), vec![0.4, 1.6]);
        assert_eq!(spike_times(&tr, "U", 2.0).unwrap(), vec![0.75]);
        assert_eq!(SpikeStats::from_trace(&tr, "U", 2.0).unwrap().count, 1);
    }

    #[test]
    fn envelope_skips_transient() {
        let t = [0.0, 1.0, 2.0, 3.0];
        let v = [100.0, -2.0, 5.0, 1.0];
        assert_eq!(envelope(&t, &v, 1.0), Some((-2.0, 5.0)));
        assert_eq!(envelope(&t, &v, 0.0), Some((-2.0, 100.0)));
        assert_eq!(envelope(&t, &v, 10.0), None);
    }
}
