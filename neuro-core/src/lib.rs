//! neuro-core: single-neuron models and the engines that run them
//!
//! - `ode`: fixed-step integrators (Euler, Heun, RK4) over a uniform time grid
//! - `map`: iteration of discrete-time maps
//! - `models`: FitzHugh-Nagumo, Hindmarsh-Rose, Hodgkin-Huxley, leaky integrate-and-fire,
//!   Morris-Lecar, Izhikevich, and the Rulkov and Chialvo maps
//! - `trace`: sampled output shared by every engine

pub mod error;
pub mod map;
pub mod models;
pub mod ode;
pub mod trace;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use map::{iterate_map, DiscreteMap};
pub use models::{
    ChialvoMap, FitzHughNagumo, HindmarshRose, HodgkinHuxley, Izhikevich, LeakyIntegrateAndFire,
    ModelKind, MorrisLecar, RulkovMap, RunSpec,
};
pub use ode::{integrate, Integrator, OdeSystem, TimeGrid};
pub use trace::Trace;
