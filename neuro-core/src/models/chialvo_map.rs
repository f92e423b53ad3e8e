//! Chialvo map: two-variable excitable map with an exponential fast nonlinearity.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelResult};
use crate::map::DiscreteMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChialvoMap {
    /// Recovery time constant (< 1).
    pub a: f64,
    /// Activation dependence of recovery.
    pub b: f64,
    /// Recovery offset.
    pub c: f64,
    /// Additive perturbation of the fast variable.
    pub k: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for ChialvoMap {
    fn default() -> Self {
        Self { a: 0.89, b: 0.6, c: 0.28, k: 0.03, x0: 0.0, y0: 0.0 }
    }
}

impl ChialvoMap {
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("k", self.k),
            ("x0", self.x0),
            ("y0", self.y0),
        ] {
            ensure_finite(name, value)?;
        }
        Ok(())
    }
}

impl DiscreteMap for ChialvoMap {
    fn name(&self) -> &'static str {
        "Chialvo map"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["x", "y"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![self.x0, self.y0]
    }

    fn iterate(&self, s: &[f64], out: &mut [f64]) {
        let (x, y) = (s[0], s[1]);
        out[0] = x * x * (y - x).exp() + self.k;
        out[1] = self.a * y - self.b * x + self.c;
    }
}

impl fmt::Display for ChialvoMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChialvoMap(a={}, b={}, c={}, k={})", self.a, self.b, self.c, self.k)
    }
}
