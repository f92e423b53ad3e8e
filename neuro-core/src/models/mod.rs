//! Model catalogue and dispatch.
//!
//! `ModelKind` is the serde-tagged union of every model (`kind = "hodgkin_huxley"` etc.) and
//! picks the right engine per model: fixed-step ODE integration, map iteration, or the
//! closed-form integrate-and-fire solution.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::map::{iterate_map, DiscreteMap};
use crate::ode::{integrate, Integrator, OdeSystem, TimeGrid};
use crate::Trace;

pub mod chialvo_map;
pub mod fitzhugh_nagumo;
pub mod hindmarsh_rose;
pub mod hodgkin_huxley;
pub mod izhikevich;
pub mod leaky_integrate_and_fire;
pub mod morris_lecar;
pub mod rulkov_map;

pub use chialvo_map::ChialvoMap;
pub use fitzhugh_nagumo::FitzHughNagumo;
pub use hindmarsh_rose::HindmarshRose;
pub use hodgkin_huxley::HodgkinHuxley;
pub use izhikevich::Izhikevich;
pub use leaky_integrate_and_fire::LeakyIntegrateAndFire;
pub use morris_lecar::MorrisLecar;
pub use rulkov_map::RulkovMap;

/// How long and how finely to run a model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSpec {
    /// Total simulated time (ms), or the number of iterations for maps.
    pub duration: f64,
    /// Sampling step; maps always use 1.
    pub dt: f64,
    /// Injected current; `None` keeps the model's own `current` parameter.
    pub current: Option<f64>,
    /// Initial state; `None` uses the model's default.
    pub initial_state: Option<Vec<f64>>,
    pub integrator: Integrator,
    /// Integrator steps per sample.
    pub substeps: usize,
}

impl Default for RunSpec {
    fn default() -> Self {
        Self {
            duration: 100.0,
            dt: 0.01,
            current: None,
            initial_state: None,
            integrator: Integrator::Rk4,
            substeps: 1,
        }
    }
}

impl RunSpec {
    pub fn with_current(&self, current: f64) -> Self {
        Self { current: Some(current), ..self.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    FitzhughNagumo(FitzHughNagumo),
    HindmarshRose(HindmarshRose),
    HodgkinHuxley(HodgkinHuxley),
    LeakyIntegrateAndFire(LeakyIntegrateAndFire),
    MorrisLecar(MorrisLecar),
    RulkovMap(RulkovMap),
    Izhikevich(Izhikevich),
    ChialvoMap(ChialvoMap),
}

impl ModelKind {
    /// Every model with its default parameters, in catalogue order.
    pub fn catalogue() -> Vec<ModelKind> {
        vec![
            ModelKind::FitzhughNagumo(FitzHughNagumo::default()),
            ModelKind::HindmarshRose(HindmarshRose::default()),
            ModelKind::HodgkinHuxley(HodgkinHuxley::default()),
            ModelKind::LeakyIntegrateAndFire(LeakyIntegrateAndFire::default()),
            ModelKind::MorrisLecar(MorrisLecar::default()),
            ModelKind::RulkovMap(RulkovMap::default()),
            ModelKind::Izhikevich(Izhikevich::default()),
            ModelKind::ChialvoMap(ChialvoMap::default()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::FitzhughNagumo(m) => m.name(),
            ModelKind::HindmarshRose(m) => m.name(),
            ModelKind::HodgkinHuxley(m) => m.name(),
            ModelKind::LeakyIntegrateAndFire(_) => "Leaky Integrate-and-Fire",
            ModelKind::MorrisLecar(m) => m.name(),
            ModelKind::RulkovMap(m) => m.name(),
            ModelKind::Izhikevich(m) => m.name(),
            ModelKind::ChialvoMap(m) => m.name(),
        }
    }

    pub fn variable_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::FitzhughNagumo(m) => m.variable_names(),
            ModelKind::HindmarshRose(m) => m.variable_names(),
            ModelKind::HodgkinHuxley(m) => m.variable_names(),
            ModelKind::LeakyIntegrateAndFire(_) => &["V"],
            ModelKind::MorrisLecar(m) => m.variable_names(),
            ModelKind::RulkovMap(m) => m.variable_names(),
            ModelKind::Izhikevich(m) => m.variable_names(),
            ModelKind::ChialvoMap(m) => m.variable_names(),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ModelKind::RulkovMap(_) | ModelKind::ChialvoMap(_))
    }

    /// The model's injected current; maps have none.
    pub fn current(&self) -> Option<f64> {
        match self {
            ModelKind::FitzhughNagumo(m) => Some(m.current),
            ModelKind::HindmarshRose(m) => Some(m.current),
            ModelKind::HodgkinHuxley(m) => Some(m.current),
            ModelKind::LeakyIntegrateAndFire(m) => Some(m.current),
            ModelKind::MorrisLecar(m) => Some(m.current),
            ModelKind::Izhikevich(m) => Some(m.current),
            ModelKind::RulkovMap(_) | ModelKind::ChialvoMap(_) => None,
        }
    }

    /// Set the injected current. Returns false (and changes nothing) for maps.
    pub fn set_current(&mut self, current: f64) -> bool {
        let slot = match self {
            ModelKind::FitzhughNagumo(m) => &mut m.current,
            ModelKind::HindmarshRose(m) => &mut m.current,
            ModelKind::HodgkinHuxley(m) => &mut m.current,
            ModelKind::LeakyIntegrateAndFire(m) => &mut m.current,
            ModelKind::MorrisLecar(m) => &mut m.current,
            ModelKind::Izhikevich(m) => &mut m.current,
            ModelKind::RulkovMap(_) | ModelKind::ChialvoMap(_) => return false,
        };
        *slot = current;
        true
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            ModelKind::FitzhughNagumo(m) => m.validate(),
            ModelKind::HindmarshRose(m) => m.validate(),
            ModelKind::HodgkinHuxley(m) => m.validate(),
            ModelKind::LeakyIntegrateAndFire(m) => m.validate(),
            ModelKind::MorrisLecar(m) => m.validate(),
            ModelKind::RulkovMap(m) => m.validate(),
            ModelKind::Izhikevich(m) => m.validate(),
            ModelKind::ChialvoMap(m) => m.validate(),
        }
    }

    /// 100 time units sampled at dt 0.01 (0.1 for Izhikevich, 1 for maps).
    pub fn default_run(&self) -> RunSpec {
        let dt = match self {
            ModelKind::Izhikevich(_) => 0.1,
            ModelKind::RulkovMap(_) | ModelKind::ChialvoMap(_) => 1.0,
            _ => 0.01,
        };
        RunSpec { dt, ..RunSpec::default() }
    }

    /// Level of the first state variable that counts as a spike.
    pub fn spike_threshold(&self) -> f64 {
        match self {
            ModelKind::LeakyIntegrateAndFire(m) => m.theta,
            ModelKind::FitzhughNagumo(_) | ModelKind::HindmarshRose(_) | ModelKind::ChialvoMap(_) => 1.0,
            _ => 0.0,
        }
    }

    pub fn simulate(&self, spec: &RunSpec) -> ModelResult<Trace> {
        self.validate()?;
        match self {
            ModelKind::FitzhughNagumo(m) => run_ode(m, spec),
            ModelKind::HindmarshRose(m) => run_ode(m, spec),
            ModelKind::HodgkinHuxley(m) => run_ode(m, spec),
            ModelKind::MorrisLecar(m) => run_ode(m, spec),
            ModelKind::Izhikevich(m) => run_ode(m, spec),
            ModelKind::RulkovMap(m) => run_map(m, spec),
            ModelKind::ChialvoMap(m) => run_map(m, spec),
            ModelKind::LeakyIntegrateAndFire(m) => {
                if spec.initial_state.is_some() {
                    tracing::warn!("integrate-and-fire always starts from VR; ignoring initial_state");
                }
                let grid = TimeGrid::new(spec.dt, spec.duration)?;
                let current = spec.current.unwrap_or(m.current);
                tracing::debug!(model = "Leaky Integrate-and-Fire", current, samples = grid.len(), "sampling");
                m.run(grid, current)
            }
        }
    }
}

fn run_ode<S: OdeSystem>(system: &S, spec: &RunSpec) -> ModelResult<Trace> {
    let grid = TimeGrid::new(spec.dt, spec.duration)?;
    let x0 = spec.initial_state.clone().unwrap_or_else(|| system.initial_state());
    let current = spec.current.unwrap_or_else(|| system.current());
    tracing::debug!(
        model = system.name(),
        current,
        samples = grid.len(),
        integrator = ?spec.integrator,
        "integrating"
    );
    integrate(system, grid, &x0, current, spec.integrator, spec.substeps)
}

fn run_map<M: DiscreteMap>(map: &M, spec: &RunSpec) -> ModelResult<Trace> {
    let steps = TimeGrid::new(1.0, spec.duration)?.len();
    let x0 = spec.initial_state.clone().unwrap_or_else(|| map.initial_state());
    tracing::debug!(model = map.name(), steps, "iterating");
    iterate_map(map, steps, &x0)
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::FitzhughNagumo(m) => fmt::Display::fmt(m, f),
            ModelKind::HindmarshRose(m) => fmt::Display::fmt(m, f),
            ModelKind::HodgkinHuxley(m) => fmt::Display::fmt(m, f),
            ModelKind::LeakyIntegrateAndFire(m) => fmt::Display::fmt(m, f),
            ModelKind::MorrisLecar(m) => fmt::Display::fmt(m, f),
            ModelKind::RulkovMap(m) => fmt::Display::fmt(m, f),
            ModelKind::Izhikevich(m) => fmt::Display::fmt(m, f),
            ModelKind::ChialvoMap(m) => fmt::Display::fmt(m, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_every_model_once() {
        let all = ModelKind::catalogue();
        assert_eq!(all.len(), 8);
        let mut names: Vec<_> = all.iter().map(ModelKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
        for m in &all {
            assert!(m.validate().is_ok(), "{} defaults invalid", m.name());
            assert!(!m.variable_names().is_empty());
        }
    }

    #[test]
    fn maps_have_no_current() {
        let mut rulkov = ModelKind::RulkovMap(RulkovMap::default());
        assert!(rulkov.is_map());
        assert_eq!(rulkov.current(), None);
        assert!(!rulkov.set_current(3.0));

        let mut hh = ModelKind::HodgkinHuxley(HodgkinHuxley::default());
        assert!(hh.set_current(7.5));
        assert_eq!(hh.current(), Some(7.5));
    }

    #[test]
    fn default_runs_produce_expected_lengths() {
        for m in ModelKind::catalogue() {
            let spec = m.default_run();
            let tr = m.simulate(&spec).unwrap();
            let expected = if m.is_map() {
                100
            } else if matches!(m, ModelKind::Izhikevich(_)) {
                1000
            } else {
                10000
            };
            assert_eq!(tr.len(), expected, "{}", m.name());
            assert_eq!(tr.names, m.variable_names());
        }
    }

    #[test]
    fn spec_current_overrides_model_current() {
        let m = ModelKind::LeakyIntegrateAndFire(LeakyIntegrateAndFire::default());
        let quiet = m.simulate(&m.default_run().with_current(0.1)).unwrap();
        assert!(quiet.spikes.is_empty());
        let busy = m.simulate(&m.default_run()).unwrap();
        assert!(!busy.spikes.is_empty());
    }

    #[test]
    fn wrong_initial_state_is_rejected() {
        let m = ModelKind::HodgkinHuxley(HodgkinHuxley::default());
        let spec = RunSpec { initial_state: Some(vec![-65.0]), ..m.default_run() };
        assert!(m.simulate(&spec).is_err());
    }

    #[test]
    fn display_delegates() {
        let m = ModelKind::RulkovMap(RulkovMap::default());
        assert_eq!(m.to_string(), "RulkovMap(alpha=6, mu=0.1, sigma=0.3)");
    }
}
