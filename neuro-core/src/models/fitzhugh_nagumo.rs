//! FitzHugh-Nagumo: two-variable reduction of Hodgkin-Huxley with a cubic fast nullcline.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelResult};
use crate::ode::OdeSystem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitzHughNagumo {
    pub a: f64,
    pub b: f64,
    /// Time-scale ratio of the recovery variable.
    pub phi: f64,
    pub current: f64,
}

impl Default for FitzHughNagumo {
    fn default() -> Self {
        Self { a: -0.7, b: 0.8, phi: 12.5, current: 0.5 }
    }
}

impl FitzHughNagumo {
    pub fn validate(&self) -> ModelResult<()> {
        ensure_finite("a", self.a)?;
        ensure_finite("b", self.b)?;
        ensure_finite("phi", self.phi)?;
        ensure_finite("current", self.current)
    }
}

impl OdeSystem for FitzHughNagumo {
    fn name(&self) -> &'static str {
        "FitzHugh-Nagumo"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["V", "W"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![0.0, 0.0]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn derivatives(&self, _t: f64, x: &[f64], current: f64, out: &mut [f64]) {
        let (v, w) = (x[0], x[1]);
        out[0] = v - v.powi(3) / 3.0 - w + current;
        out[1] = self.phi * (v + self.a - self.b * w);
    }
}

impl fmt::Display for FitzHughNagumo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FitzHughNagumo(a={}, b={}, current={}, phi={})", self.a, self.b, self.current, self.phi)
    }
}
