//! Hodgkin-Huxley squid giant axon model (modern sign convention, rest near -65 mV).
//!
//! State order is `[V, m, n, h]`; voltages in mV, time in ms, current in µA/cm².

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_positive, ModelResult};
use crate::ode::OdeSystem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HodgkinHuxley {
    /// Membrane capacitance.
    pub c: f64,
    pub v_na: f64,
    pub v_k: f64,
    pub v_l: f64,
    pub g_na: f64,
    pub g_k: f64,
    pub g_l: f64,
    pub current: f64,
}

impl Default for HodgkinHuxley {
    fn default() -> Self {
        Self {
            c: 1.0,
            v_na: 50.0,
            v_k: -77.0,
            v_l: -54.4,
            g_na: 120.0,
            g_k: 36.0,
            g_l: 0.3,
            current: 1.0,
        }
    }
}

/// `x / (1 - exp(-x / 10))`, continuous through its removable singularity at 0.
#[inline]
fn linoid(x: f64) -> f64 {
    if x.abs() < 1e-6 {
        10.0 * (1.0 + x / 20.0)
    } else {
        x / (1.0 - (-x / 10.0).exp())
    }
}

#[inline]
pub fn alpha_m(v: f64) -> f64 {
    0.1 * linoid(v + 40.0)
}

#[inline]
pub fn beta_m(v: f64) -> f64 {
    4.0 * (-(v + 65.0) / 18.0).exp()
}

#[inline]
pub fn alpha_n(v: f64) -> f64 {
    0.01 * linoid(v + 55.0)
}

#[inline]
pub fn beta_n(v: f64) -> f64 {
    0.125 * (-(v + 65.0) / 80.0).exp()
}

#[inline]
pub fn alpha_h(v: f64) -> f64 {
    0.07 * (-(v + 65.0) / 20.0).exp()
}

#[inline]
pub fn beta_h(v: f64) -> f64 {
    1.0 / (1.0 + (-(v + 35.0) / 10.0).exp())
}

impl HodgkinHuxley {
    pub fn validate(&self) -> ModelResult<()> {
        ensure_positive("c", self.c)?;
        for (name, value) in [
            ("v_na", self.v_na),
            ("v_k", self.v_k),
            ("v_l", self.v_l),
            ("g_na", self.g_na),
            ("g_k", self.g_k),
            ("g_l", self.g_l),
            ("current", self.current),
        ] {
            ensure_finite(name, value)?;
        }
        Ok(())
    }

    /// Membrane at -65 mV with every gate at its steady-state opening.
    pub fn resting_state(&self) -> Vec<f64> {
        let v = -65.0;
        let m = alpha_m(v) / (alpha_m(v) + beta_m(v));
        let n = alpha_n(v) / (alpha_n(v) + beta_n(v));
        let h = alpha_h(v) / (alpha_h(v) + beta_h(v));
        vec![v, m, n, h]
    }

    /// Ionic currents `(I_Na, I_K, I_L)` at a state.
    pub fn ionic_currents(&self, x: &[f64]) -> (f64, f64, f64) {
        let (v, m, n, h) = (x[0], x[1], x[2], x[3]);
        let i_na = self.g_na * m.powi(3) * h * (v - self.v_na);
        let i_k = self.g_k * n.powi(4) * (v - self.v_k);
        let i_l = self.g_l * (v - self.v_l);
        (i_na, i_k, i_l)
    }
}

impl OdeSystem for HodgkinHuxley {
    fn name(&self) -> &'static str {
        "Hodgkin-Huxley"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["V", "m", "n", "h"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![0.0, 0.0, 0.0, 0.0]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn derivatives(&self, _t: f64, x: &[f64], current: f64, out: &mut [f64]) {
        let (v, m, n, h) = (x[0], x[1], x[2], x[3]);
        let (i_na, i_k, i_l) = self.ionic_currents(x);
        out[0] = (current - i_na - i_k - i_l) / self.c;
        out[1] = alpha_m(v) * (1.0 - m) - beta_m(v) * m;
        out[2] = alpha_n(v) * (1.0 - n) - beta_n(v) * n;
        out[3] = alpha_h(v) * (1.0 - h) - beta_h(v) * h;
    }
}

impl fmt::Display for HodgkinHuxley {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HodgkinHuxley(C={}, I={}, VNa={}, VK={}, VL={}, gNa={}, gK={}, gL={})",
            self.c, self.current, self.v_na, self.v_k, self.v_l, self.g_na, self.g_k, self.g_l
        )
    }
}
