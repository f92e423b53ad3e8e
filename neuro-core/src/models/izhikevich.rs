//! Izhikevich simple model: quadratic membrane, linear recovery, hard reset at +30 mV.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelResult};
use crate::ode::OdeSystem;

/// Spike cutoff; crossing it resets `v` to `c` and bumps `u` by `d`.
pub const V_PEAK: f64 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Izhikevich {
    /// Time scale of the recovery variable `u`.
    pub a: f64,
    /// Sensitivity of `u` to subthreshold `v`.
    pub b: f64,
    /// After-spike reset of `v`.
    pub c: f64,
    /// After-spike increment of `u`.
    pub d: f64,
    pub current: f64,
}

impl Default for Izhikevich {
    fn default() -> Self {
        Self::regular_spiking()
    }
}

impl Izhikevich {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d, current: 10.0 }
    }

    /// Regular spiking (RS), typical excitatory cortical cell.
    pub fn regular_spiking() -> Self {
        Self::new(0.02, 0.2, -65.0, 8.0)
    }

    pub fn intrinsically_bursting() -> Self {
        Self::new(0.02, 0.2, -55.0, 4.0)
    }

    pub fn chattering() -> Self {
        Self::new(0.02, 0.2, -50.0, 2.0)
    }

    /// Fast spiking (FS) inhibitory interneuron.
    pub fn fast_spiking() -> Self {
        Self::new(0.1, 0.2, -65.0, 2.0)
    }

    pub fn low_threshold_spiking() -> Self {
        Self::new(0.02, 0.25, -65.0, 2.0)
    }

    /// Look up a preset by its short name (`rs`, `ib`, `ch`, `fs`, `lts`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "rs" | "regular_spiking" => Some(Self::regular_spiking()),
            "ib" | "intrinsically_bursting" => Some(Self::intrinsically_bursting()),
            "ch" | "chattering" => Some(Self::chattering()),
            "fs" | "fast_spiking" => Some(Self::fast_spiking()),
            "lts" | "low_threshold_spiking" => Some(Self::low_threshold_spiking()),
            _ => None,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        ensure_finite("a", self.a)?;
        ensure_finite("b", self.b)?;
        ensure_finite("c", self.c)?;
        ensure_finite("d", self.d)?;
        ensure_finite("current", self.current)
    }
}

impl OdeSystem for Izhikevich {
    fn name(&self) -> &'static str {
        "Izhikevich"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["V", "U"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![-65.0, self.b * -65.0]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn derivatives(&self, _t: f64, x: &[f64], current: f64, out: &mut [f64]) {
        let (v, u) = (x[0], x[1]);
        out[0] = 0.04 * v * v + 5.0 * v + 140.0 - u + current;
        out[1] = self.a * (self.b * v - u);
    }

    fn after_step(&self, state: &mut [f64]) -> bool {
        if state[0] >= V_PEAK {
            state[0] = self.c;
            state[1] += self.d;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Izhikevich {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Izhikevich(a={}, b={}, c={}, d={}, I={})", self.a, self.b, self.c, self.d, self.current)
    }
}
