//! Rulkov map: piecewise fast variable `x` driven by a slow variable `y`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelResult};
use crate::map::DiscreteMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulkovMap {
    pub alpha: f64,
    /// Slow time scale, small compared to 1.
    pub mu: f64,
    /// External drive entering the slow subsystem.
    pub sigma: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for RulkovMap {
    fn default() -> Self {
        Self { alpha: 6.0, mu: 0.1, sigma: 0.3, x0: 0.0, y0: 0.0 }
    }
}

impl RulkovMap {
    pub fn validate(&self) -> ModelResult<()> {
        ensure_finite("alpha", self.alpha)?;
        ensure_finite("mu", self.mu)?;
        ensure_finite("sigma", self.sigma)?;
        ensure_finite("x0", self.x0)?;
        ensure_finite("y0", self.y0)
    }

    /// Fast subsystem: hyperbolic branch below zero, plateau, then reset to -1.
    #[inline]
    pub fn fast(&self, x: f64, y: f64) -> f64 {
        if x <= 0.0 {
            self.alpha / (1.0 - x) + y
        } else if x < self.alpha + y {
            self.alpha + y
        } else {
            -1.0
        }
    }
}

impl DiscreteMap for RulkovMap {
    fn name(&self) -> &'static str {
        "Rulkov map"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["x", "y"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![self.x0, self.y0]
    }

    fn iterate(&self, s: &[f64], out: &mut [f64]) {
        let (x, y) = (s[0], s[1]);
        out[0] = self.fast(x, y);
        out[1] = y - self.mu * (x + 1.0) + self.mu * self.sigma;
    }
}

impl fmt::Display for RulkovMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RulkovMap(alpha={}, mu={}, sigma={})", self.alpha, self.mu, self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::iterate_map;

    #[test]
    fn fast_branches() {
        let m = RulkovMap::default();
        // x <= 0: alpha / (1 - x) + y
        assert_eq!(m.fast(-1.0, 0.0), 3.0);
        assert_eq!(m.fast(0.0, -1.0), 5.0);
        // plateau
        assert_eq!(m.fast(3.0, 0.0), 6.0);
        // reset at or above alpha + y
        assert_eq!(m.fast(6.0, 0.0), -1.0);
        assert_eq!(m.fast(1.0, -5.5), -1.0);
    }

    #[test]
    fn spike_sequence_from_rest() {
        let m = RulkovMap { mu: 0.0, ..Default::default() };
        let tr = iterate_map(&m, 5, &[-1.0, 0.0]).unwrap();
        assert_eq!(tr.primary(), &[-1.0, 3.0, 6.0, -1.0, 3.0]);
        assert!(tr.variable("y").unwrap().iter().all(|&y| y == 0.0));
    }

    #[test]
    fn slow_variable_update() {
        let m = RulkovMap::default();
        let mut out = [0.0; 2];
        m.iterate(&[1.0, 0.5], &mut out);
        // 0.5 - 0.1 * 2 + 0.1 * 0.3
        assert!((out[1] - 0.33).abs() < 1e-12);
    }

    #[test]
    fn initial_state_uses_both_fields() {
        let m = RulkovMap { x0: -1.5, y0: -2.5, ..Default::default() };
        assert_eq!(m.initial_state(), vec![-1.5, -2.5]);
    }
}
