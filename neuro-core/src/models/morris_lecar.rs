//! Morris-Lecar barnacle muscle fibre model: instantaneous Ca²⁺ activation, slow K⁺ recovery `N`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_nonzero, ensure_positive, ModelResult};
use crate::ode::OdeSystem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorrisLecar {
    pub c: f64,
    pub v_l: f64,
    pub v_ca: f64,
    pub v_k: f64,
    pub g_l: f64,
    pub g_ca: f64,
    pub g_k: f64,
    /// Potential at which `Mss` is half open.
    pub v1: f64,
    /// Reciprocal slope of `Mss`.
    pub v2: f64,
    /// Potential at which `Nss` is half open.
    pub v3: f64,
    /// Reciprocal slope of `Nss`.
    pub v4: f64,
    /// Recovery time scale.
    pub phi: f64,
    pub current: f64,
}

impl Default for MorrisLecar {
    fn default() -> Self {
        Self {
            c: 20.0,
            v_l: -60.0,
            v_ca: 120.0,
            v_k: -84.0,
            g_l: 2.0,
            g_ca: 4.0,
            g_k: 8.0,
            v1: -1.2,
            v2: 18.0,
            v3: 12.0,
            v4: 17.4,
            phi: 0.06,
            current: 1.0,
        }
    }
}

impl MorrisLecar {
    pub fn validate(&self) -> ModelResult<()> {
        ensure_positive("c", self.c)?;
        ensure_positive("phi", self.phi)?;
        ensure_nonzero("v2", self.v2)?;
        ensure_nonzero("v4", self.v4)?;
        for (name, value) in [
            ("v_l", self.v_l),
            ("v_ca", self.v_ca),
            ("v_k", self.v_k),
            ("g_l", self.g_l),
            ("g_ca", self.g_ca),
            ("g_k", self.g_k),
            ("v1", self.v1),
            ("v3", self.v3),
            ("current", self.current),
        ] {
            ensure_finite(name, value)?;
        }
        Ok(())
    }

    #[inline]
    pub fn m_ss(&self, v: f64) -> f64 {
        0.5 * (1.0 + ((v - self.v1) / self.v2).tanh())
    }

    #[inline]
    pub fn n_ss(&self, v: f64) -> f64 {
        0.5 * (1.0 + ((v - self.v3) / self.v4).tanh())
    }

    /// Relaxation time of `N`; the recovery rate is `(Nss - N) / tau_n`.
    #[inline]
    pub fn tau_n(&self, v: f64) -> f64 {
        ((v - self.v3) / (2.0 * self.v4)).cosh() / self.phi
    }
}

impl OdeSystem for MorrisLecar {
    fn name(&self) -> &'static str {
        "Morris-Lecar"
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["V", "N"]
    }

    fn initial_state(&self) -> Vec<f64> {
        vec![0.0, 0.0]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn derivatives(&self, _t: f64, x: &[f64], current: f64, out: &mut [f64]) {
        let (v, n) = (x[0], x[1]);
        let i_l = self.g_l * (v - self.v_l);
        let i_ca = self.g_ca * self.m_ss(v) * (v - self.v_ca);
        let i_k = self.g_k * n * (v - self.v_k);
        out[0] = (current - i_l - i_ca - i_k) / self.c;
        out[1] = (self.n_ss(v) - n) / self.tau_n(v);
    }
}

impl fmt::Display for MorrisLecar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MorrisLecar(C={}, VL={}, VCa={}, VK={}, gL={}, gCa={}, gK={}, V1={}, V2={}, V3={}, V4={}, phi={}, I={})",
            self.c,
            self.v_l,
            self.v_ca,
            self.v_k,
            self.g_l,
            self.g_ca,
            self.g_k,
            self.v1,
            self.v2,
            self.v3,
            self.v4,
            self.phi,
            self.current
        )
    }
}
