//! Fixed-step integration of continuous-time neuron models.
//!
//! Semantics:
//! - A [`TimeGrid`] samples `0, dt, 2dt, ...` strictly below `duration`.
//! - [`integrate`] records the initial state at t=0 and one row per grid time after it.
//! - Each grid interval may be split into `substeps` equal integrator steps.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ModelError, ModelResult};
use crate::Trace;

/// A continuous-time model `dx/dt = f(t, x; I)` driven by an injected current `I`.
pub trait OdeSystem {
    fn name(&self) -> &'static str;

    /// Names of the state variables, in state-vector order.
    fn variable_names(&self) -> &'static [&'static str];

    fn initial_state(&self) -> Vec<f64>;

    /// The model's own injected-current parameter.
    fn current(&self) -> f64;

    /// Write `dx/dt` at `(t, state)` into `out`.
    fn derivatives(&self, t: f64, state: &[f64], current: f64, out: &mut [f64]);

    /// Discontinuous reset applied after every step. Returns true when the model fired.
    fn after_step(&self, _state: &mut [f64]) -> bool {
        false
    }

    fn dim(&self) -> usize {
        self.variable_names().len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integrator {
    /// Forward Euler, first order.
    Euler,
    /// Heun's method (explicit trapezoid), second order.
    Heun,
    /// Classic fourth-order Runge-Kutta.
    #[default]
    Rk4,
}

/// Stage buffers reused across steps.
struct Scratch {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    tmp: Vec<f64>,
}

impl Scratch {
    fn new(dim: usize) -> Self {
        Self {
            k1: vec![0.0; dim],
            k2: vec![0.0; dim],
            k3: vec![0.0; dim],
            k4: vec![0.0; dim],
            tmp: vec![0.0; dim],
        }
    }
}

impl Integrator {
    /// Advance `state` in place from `t` to `t + dt`.
    pub fn step<S: OdeSystem + ?Sized>(self, system: &S, t: f64, state: &mut [f64], dt: f64, current: f64) {
        let mut scratch = Scratch::new(state.len());
        self.step_with(system, t, state, dt, current, &mut scratch);
    }

    fn step_with<S: OdeSystem + ?Sized>(
        self,
        system: &S,
        t: f64,
        state: &mut [f64],
        dt: f64,
        current: f64,
        s: &mut Scratch,
    ) {
        match self {
            Integrator::Euler => {
                system.derivatives(t, state, current, &mut s.k1);
                for (x, k) in state.iter_mut().zip(&s.k1) {
                    *x += dt * k;
                }
            }
            Integrator::Heun => {
                system.derivatives(t, state, current, &mut s.k1);
                for i in 0..state.len() {
                    s.tmp[i] = state[i] + dt * s.k1[i];
                }
                system.derivatives(t + dt, &s.tmp, current, &mut s.k2);
                for i in 0..state.len() {
                    state[i] += 0.5 * dt * (s.k1[i] + s.k2[i]);
                }
            }
            Integrator::Rk4 => {
                let half = 0.5 * dt;
                system.derivatives(t, state, current, &mut s.k1);
                for i in 0..state.len() {
                    s.tmp[i] = state[i] + half * s.k1[i];
                }
                system.derivatives(t + half, &s.tmp, current, &mut s.k2);
                for i in 0..state.len() {
                    s.tmp[i] = state[i] + half * s.k2[i];
                }
                system.derivatives(t + half, &s.tmp, current, &mut s.k3);
                for i in 0..state.len() {
                    s.tmp[i] = state[i] + dt * s.k3[i];
                }
                system.derivatives(t + dt, &s.tmp, current, &mut s.k4);
                for i in 0..state.len() {
                    state[i] += dt / 6.0 * (s.k1[i] + 2.0 * s.k2[i] + 2.0 * s.k3[i] + s.k4[i]);
                }
            }
        }
    }
}

/// Uniform sample times `0, dt, 2dt, ...` strictly below `duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    pub dt: f64,
    pub duration: f64,
}

impl TimeGrid {
    pub fn new(dt: f64, duration: f64) -> ModelResult<Self> {
        if !(dt.is_finite() && duration.is_finite() && dt > 0.0 && duration > 0.0) {
            return Err(ModelError::InvalidTimeStep { dt, duration });
        }
        Ok(Self { dt, duration })
    }

    /// Number of samples, `ceil(duration / dt)` with float noise on exact multiples ignored.
    pub fn len(&self) -> usize {
        let n = self.duration / self.dt;
        let rounded = n.round();
        if (n - rounded).abs() <= 1e-9 * rounded.max(1.0) {
            rounded as usize
        } else {
            n.ceil() as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }
}

/// Integrate `system` over `grid` from `x0` with a constant injected `current`.
pub fn integrate<S: OdeSystem + ?Sized>(
    system: &S,
    grid: TimeGrid,
    x0: &[f64],
    current: f64,
    integrator: Integrator,
    substeps: usize,
) -> ModelResult<Trace> {
    let dim = system.dim();
    if x0.len() != dim {
        return Err(ModelError::StateDimension { expected: dim, got: x0.len() });
    }
    if substeps == 0 {
        return Err(ModelError::InvalidParameter {
            name: "substeps",
            reason: "must be at least 1".to_string(),
        });
    }
    ensure_finite("current", current)?;
    for &x in x0 {
        ensure_finite("initial_state", x)?;
    }

    let rows = grid.len();
    let h = grid.dt / substeps as f64;
    let mut trace = Trace::with_capacity(system.variable_names(), rows);
    let mut state = x0.to_vec();
    let mut scratch = Scratch::new(dim);
    trace.push(0.0, &state);

    for i in 1..rows {
        let t0 = grid.time(i - 1);
        for k in 0..substeps {
            let t = t0 + k as f64 * h;
            integrator.step_with(system, t, &mut state, h, current, &mut scratch);
            if system.after_step(&mut state) {
                trace.spikes.push(t + h);
            }
        }
        let t = grid.time(i);
        if state.iter().any(|x| !x.is_finite()) {
            tracing::warn!(model = system.name(), time = t, "state diverged");
            return Err(ModelError::Diverged { time: t });
        }
        trace.push(t, &state);
    }

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dx/dt = -x + I, exact solution x(t) = I + (x0 - I) e^{-t}
    struct Decay;

    impl OdeSystem for Decay {
        fn name(&self) -> &'static str {
            "decay"
        }
        fn variable_names(&self) -> &'static [&'static str] {
            &["x"]
        }
        fn initial_state(&self) -> Vec<f64> {
            vec![1.0]
        }
        fn current(&self) -> f64 {
            0.0
        }
        fn derivatives(&self, _t: f64, state: &[f64], current: f64, out: &mut [f64]) {
            out[0] = -state[0] + current;
        }
    }

    struct Blowup;

    impl OdeSystem for Blowup {
        fn name(&self) -> &'static str {
            "blowup"
        }
        fn variable_names(&self) -> &'static [&'static str] {
            &["x"]
        }
        fn initial_state(&self) -> Vec<f64> {
            vec![1.0]
        }
        fn current(&self) -> f64 {
            0.0
        }
        fn derivatives(&self, _t: f64, state: &[f64], _current: f64, out: &mut [f64]) {
            out[0] = state[0] * state[0] * 1e100;
        }
    }

    fn final_x(integrator: Integrator, substeps: usize) -> f64 {
        // 11 samples: t = 0.0 ..= 1.0
        let grid = TimeGrid::new(0.1, 1.05).unwrap();
        let tr = integrate(&Decay, grid, &[1.0], 0.0, integrator, substeps).unwrap();
        assert_eq!(tr.len(), 11);
        assert!((tr.duration() - 1.0).abs() < 1e-12);
        tr.final_state().unwrap()[0]
    }

    #[test]
    fn integrator_orders() {
        let exact = (-1.0f64).exp();
        let e_euler = (final_x(Integrator::Euler, 1) - exact).abs();
        let e_heun = (final_x(Integrator::Heun, 1) - exact).abs();
        let e_rk4 = (final_x(Integrator::Rk4, 1) - exact).abs();
        assert!(e_euler < 0.03);
        assert!(e_heun < e_euler);
        assert!(e_rk4 < 1e-6);
        assert!(e_rk4 < e_heun);
    }

    #[test]
    fn substeps_reduce_error() {
        let exact = (-1.0f64).exp();
        let coarse = (final_x(Integrator::Euler, 1) - exact).abs();
        let fine = (final_x(Integrator::Euler, 10) - exact).abs();
        assert!(fine < coarse / 5.0);
    }

    #[test]
    fn constant_current_shifts_fixed_point() {
        let grid = TimeGrid::new(0.01, 20.0).unwrap();
        let tr = integrate(&Decay, grid, &[0.0], 2.5, Integrator::Rk4, 1).unwrap();
        assert!((tr.final_state().unwrap()[0] - 2.5).abs() < 1e-6);
    }

    #[test]
    fn grid_length_matches_arange() {
        assert_eq!(TimeGrid::new(0.01, 100.0).unwrap().len(), 10000);
        assert_eq!(TimeGrid::new(0.1, 1.0).unwrap().len(), 10);
        assert_eq!(TimeGrid::new(0.3, 1.0).unwrap().len(), 4);
        assert_eq!(TimeGrid::new(1.0, 100.0).unwrap().len(), 100);
    }

    #[test]
    fn rejects_bad_grid_and_state() {
        assert!(matches!(TimeGrid::new(0.0, 1.0), Err(ModelError::InvalidTimeStep { .. })));
        assert!(matches!(TimeGrid::new(0.1, -1.0), Err(ModelError::InvalidTimeStep { .. })));
        assert!(TimeGrid::new(f64::NAN, 1.0).is_err());

        let grid = TimeGrid::new(0.1, 1.0).unwrap();
        assert_eq!(
            integrate(&Decay, grid, &[1.0, 2.0], 0.0, Integrator::Rk4, 1),
            Err(ModelError::StateDimension { expected: 1, got: 2 })
        );
        assert!(integrate(&Decay, grid, &[1.0], 0.0, Integrator::Rk4, 0).is_err());
        assert!(integrate(&Decay, grid, &[1.0], f64::INFINITY, Integrator::Rk4, 1).is_err());
    }

    #[test]
    fn divergence_is_reported() {
        let grid = TimeGrid::new(0.1, 10.0).unwrap();
        let err = integrate(&Blowup, grid, &[1.0], 0.0, Integrator::Euler, 1).unwrap_err();
        assert!(matches!(err, ModelError::Diverged { .. }));
    }
}
