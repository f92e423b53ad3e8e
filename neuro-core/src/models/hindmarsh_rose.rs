//! Hindmarsh-Rose: three-variable bursting model with a slow adaptation current `z`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelResult};
use crate::ode::OdeSystem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HindmarshRose {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Slow time scale of `z`.
    pub r: f64,
    pub s: f64,
    /// Resting potential of the slow subsystem.
    pub x1: f64,
    pub current: f64,
}

impl Default for HindmarshRose {
    fn default() -> Self {
        Self { a: 0.5, b: 0.5, c: 0.5, d: 0.5, r: 1.0, s: 1.0, x1: -1.0, current: 1.0 }
    }
}

impl HindmarshRose {
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("d", self.d),
            ("r", self.r),
            ("s", self.s),
            ("x1", self.x1),
            ("current", self.current),
        ] {
            ensure_finite(name, value)?;
        }
        Ok(())
    }
}

impl OdeSystem for HindmarshRose {
    fn name(&self) -> &'static str {
        "Hindmarsh-Rose"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["x", "y", "z"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![0.0, 0.0, 0.0]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn derivatives(&self, _t: f64, s: &[f64], current: f64, out: &mut [f64]) {
        let (x, y, z) = (s[0], s[1], s[2]);
        out[0] = y - self.a * x.powi(3) + self.b * x * x - z + current;
        out[1] = self.c - self.d * x * x - y;
        out[2] = self.r * (self.s * (x - self.x1) - z);
    }
}

impl fmt::Display for HindmarshRose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HindmarshRose(a={}, b={}, c={}, d={}, r={}, s={}, x1={}, current={})",
            self.a, self.b, self.c, self.d, self.r, self.s, self.x1, self.current
        )
    }
}
