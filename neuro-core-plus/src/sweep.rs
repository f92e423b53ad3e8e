//! Current sweeps: rerun one model over a ladder of injected currents.
//!
//! Semantics:
//! - `CurrentSweep` is inclusive at both ends; `currents()` never overshoots `stop`.
//! - `run_sweep()` returns frames in ascending current order regardless of how they were computed.
//! - F-I curves and oscillation envelopes are derived from the frames afterwards.

use neuro_core::{ModelKind, RunSpec, Trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PlusError, PlusResult};
use crate::spikes::{envelope, SpikeStats};

/// Upper bound on the number of frames a sweep may request.
pub const MAX_FRAMES: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentSweep {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for CurrentSweep {
    /// -5 to 10 in unit steps (16 frames).
    fn default() -> Self {
        Self { start: -5.0, stop: 10.0, step: 1.0 }
    }
}

impl CurrentSweep {
    pub fn new(start: f64, stop: f64, step: f64) -> PlusResult<Self> {
        let sweep = Self { start, stop, step };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> PlusResult<()> {
        if !(self.start.is_finite() && self.stop.is_finite()) {
            return Err(PlusError::config("sweep", "start and stop must be finite"));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(PlusError::config("sweep.step", format!("must be positive, got {}", self.step)));
        }
        if self.stop < self.start {
            return Err(PlusError::config("sweep.stop", "must not be below sweep.start"));
        }
        let intervals = self.intervals();
        if !(intervals.is_finite() && intervals < MAX_FRAMES as f64) {
            return Err(PlusError::config(
                "sweep.step",
                format!("too small for the range, at most {MAX_FRAMES} frames allowed"),
            ));
        }
        Ok(())
    }

    fn intervals(&self) -> f64 {
        ((self.stop - self.start) / self.step + 1e-9).floor()
    }

    /// Number of frames. Saturates for ranges `validate()` would reject.
    pub fn len(&self) -> usize {
        (self.intervals() as usize).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn currents(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.start + i as f64 * self.step).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepFrame {
    pub current: f64,
    pub trace: Trace,
}

/// Simulate `model` once per current of `sweep`.
pub fn run_sweep(model: &ModelKind, spec: &RunSpec, sweep: &CurrentSweep) -> PlusResult<Vec<SweepFrame>> {
    if model.is_map() {
        return Err(PlusError::NotSupported("current sweep over a map model"));
    }
    sweep.validate()?;
    model.validate()?;

    let currents = sweep.currents();
    tracing::info!(model = model.name(), frames = currents.len(), "running current sweep");

    let simulate = |current: &f64| -> PlusResult<SweepFrame> {
        let trace = model.simulate(&spec.with_current(*current))?;
        Ok(SweepFrame { current: *current, trace })
    };

    #[cfg(feature = "parallel")]
    let frames = currents.par_iter().map(simulate).collect::<PlusResult<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let frames = currents.iter().map(simulate).collect::<PlusResult<Vec<_>>>()?;

    Ok(frames)
}

/// One point of a frequency-current curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FiPoint {
    pub current: f64,
    pub spikes: usize,
    pub rate_hz: f64,
}

pub fn fi_curve(frames: &[SweepFrame], variable: &str, threshold: f64) -> PlusResult<Vec<FiPoint>> {
    frames
        .iter()
        .map(|f| {
            let stats = SpikeStats::from_trace(&f.trace, variable, threshold)?;
            Ok(FiPoint { current: f.current, spikes: stats.count, rate_hz: stats.firing_rate_hz })
        })
        .collect()
}

/// Post-transient `(min, max)` of a variable per current.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnvelopePoint {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

impl EnvelopePoint {
    pub fn amplitude(&self) -> f64 {
        self.max - self.min
    }
}

/// Oscillation envelope across the sweep; a jump from zero to finite amplitude marks a Hopf onset.
pub fn hopf_envelope(frames: &[SweepFrame], variable: &str, transient: f64) -> PlusResult<Vec<EnvelopePoint>> {
    frames
        .iter()
        .map(|f| {
            let signal = f
                .trace
                .variable(variable)
                .ok_or_else(|| PlusError::UnknownVariable(variable.to_string()))?;
            let (min, max) = envelope(&f.trace.time, signal, transient)
                .ok_or_else(|| PlusError::config("analysis.transient", "longer than the run"))?;
            Ok(EnvelopePoint { current: f.current, min, max })
        })
        .collect()
}
