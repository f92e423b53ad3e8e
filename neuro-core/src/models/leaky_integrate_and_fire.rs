//! Leaky integrate-and-fire with a closed-form charging curve.
//!
//! Between spikes the membrane follows `V(s) = VR + R I (1 - exp(-s / tau))`, where `s` is the
//! time since the last reset. A sample above `theta` is a spike; the next sample restarts at `VR`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ModelError, ModelResult};
use crate::ode::TimeGrid;
use crate::Trace;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeakyIntegrateAndFire {
    /// Resting (and reset) potential.
    pub v_r: f64,
    /// Membrane resistance.
    pub r: f64,
    /// Membrane capacitance.
    pub c: f64,
    pub current: f64,
    /// Firing threshold.
    pub theta: f64,
}

impl Default for LeakyIntegrateAndFire {
    fn default() -> Self {
        Self { v_r: -70.0, r: 100.0, c: 0.3, current: 0.3, theta: -55.0 }
    }
}

impl LeakyIntegrateAndFire {
    pub fn validate(&self) -> ModelResult<()> {
        ensure_finite("v_r", self.v_r)?;
        ensure_positive("r", self.r)?;
        ensure_positive("c", self.c)?;
        ensure_finite("current", self.current)?;
        ensure_finite("theta", self.theta)?;
        if self.theta <= self.v_r {
            return Err(ModelError::InvalidParameter {
                name: "theta",
                reason: format!("must lie above v_r ({})", self.v_r),
            });
        }
        Ok(())
    }

    /// Membrane time constant `R C`.
    pub fn tau(&self) -> f64 {
        self.r * self.c
    }

    /// Analytic inter-spike period for `current`, or `None` when the steady state
    /// `VR + R I` never exceeds `theta`.
    pub fn period_at(&self, current: f64) -> Option<f64> {
        let drive = self.r * current;
        let gap = self.theta - self.v_r;
        if drive <= gap {
            return None;
        }
        Some(-self.tau() * (1.0 - gap / drive).ln())
    }

    pub fn period(&self) -> Option<f64> {
        self.period_at(self.current)
    }

    pub fn frequency(&self) -> Option<f64> {
        self.period().map(|p| 1.0 / p)
    }

    /// Membrane potential `since` time units after a reset.
    #[inline]
    pub fn potential(&self, since: f64, current: f64) -> f64 {
        self.v_r + self.r * current * (1.0 - (-since / self.tau()).exp())
    }

    /// Sample the closed-form solution over `grid`, recording spike times in `Trace::spikes`.
    pub fn run(&self, grid: TimeGrid, current: f64) -> ModelResult<Trace> {
        self.validate()?;
        ensure_finite("current", current)?;

        let rows = grid.len();
        let mut trace = Trace::with_capacity(&["V"], rows);
        let mut since = 0.0;
        for i in 0..rows {
            let t = grid.time(i);
            let v = self.potential(since, current);
            trace.push(t, &[v]);
            since += grid.dt;
            if v > self.theta {
                trace.spikes.push(t);
                since = 0.0;
            }
        }
        Ok(trace)
    }
}

impl fmt::Display for LeakyIntegrateAndFire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LeakyIntegrateAndFire(VR={}, R={}, C={}, tau={}, I={}, theta={}",
            self.v_r,
            self.r,
            self.c,
            self.tau(),
            self.current,
            self.theta
        )?;
        match (self.period(), self.frequency()) {
            (Some(t), Some(fr)) => write!(f, ", T={:.3}, f={:.3})", t, fr),
            _ => write!(f, ", T=inf, f=0)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_period_and_frequency() {
        let m = LeakyIntegrateAndFire::default();
        assert!((m.tau() - 30.0).abs() < 1e-9);
        // -30 ln(1 - 15/30) = 30 ln 2
        let p = m.period().unwrap();
        assert!((p - 30.0 * 2f64.ln()).abs() < 1e-9);
        assert!((m.frequency().unwrap() - 1.0 / p).abs() < 1e-12);
    }

    #[test]
    fn subthreshold_current_never_fires() {
        let m = LeakyIntegrateAndFire { current: 0.15, ..Default::default() };
        assert_eq!(m.period(), None);
        let tr = m.run(TimeGrid::new(0.01, 200.0).unwrap(), m.current).unwrap();
        assert!(tr.spikes.is_empty());
        assert!(tr.primary().iter().all(|&v| v <= m.theta));
        assert!(m.to_string().ends_with("T=inf, f=0)"));
    }

    #[test]
    fn discrete_run_tracks_analytic_period() {
        let m = LeakyIntegrateAndFire::default();
        let tr = m.run(TimeGrid::new(0.01, 100.0).unwrap(), m.current).unwrap();
        assert_eq!(tr.len(), 10000);
        assert_eq!(tr.primary()[0], m.v_r);
        assert!(tr.spikes.len() >= 4);
        let p = m.period().unwrap();
        for w in tr.spikes.windows(2) {
            assert!(((w[1] - w[0]) - p).abs() < 0.05);
        }
    }

    #[test]
    fn sample_after_spike_is_reset() {
        let m = LeakyIntegrateAndFire::default();
        let grid = TimeGrid::new(0.01, 50.0).unwrap();
        let tr = m.run(grid, m.current).unwrap();
        let first = tr.spikes[0];
        let idx = tr.time.iter().position(|&t| t == first).unwrap();
        assert!(tr.primary()[idx] > m.theta);
        assert_eq!(tr.primary()[idx + 1], m.v_r);
    }

    #[test]
    fn threshold_below_rest_is_rejected() {
        let m = LeakyIntegrateAndFire { theta: -80.0, ..Default::default() };
        assert!(m.validate().is_err());
    }
}
