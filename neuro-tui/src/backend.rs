// Backend abstraction for the TUI so the viewer is independent of how traces are produced.

use neuro_core::{ModelKind, RunSpec, Trace};
use neuro_core_plus::{run_sweep, CurrentSweep, PlusResult, SimulationConfig, SweepFrame};

/// Common interface for anything that can drive the viewer.
pub trait SimBackend {
    /// The selected model, with its current parameters.
    fn model(&self) -> &ModelKind;
    /// Cycle to the next model in the catalogue.
    fn next_model(&mut self);
    /// Change the injected current of the selected model. Returns false for maps.
    fn set_current(&mut self, current: f64) -> bool;
    /// Run the selected model once.
    fn simulate(&self) -> PlusResult<Trace>;

    /// Run the selected model over a current ladder.
    fn sweep(&self, sweep: &CurrentSweep) -> PlusResult<Vec<SweepFrame>>;
}

/// Implementation backed by the neuro-core model catalogue.
pub struct CoreBackend {
    models: Vec<ModelKind>,
    index: usize,
    /// Run settings from a config file; applies only to the model it was written for.
    run_override: Option<(usize, RunSpec)>,
}

impl CoreBackend {
    pub fn new() -> Self {
        Self { models: ModelKind::catalogue(), index: 0, run_override: None }
    }

    /// Start on the configured model, keeping the rest of the catalogue reachable.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut backend = Self::new();
        let slot = backend
            .models
            .iter()
            .position(|m| std::mem::discriminant(m) == std::mem::discriminant(&config.model))
            .unwrap_or(0);
        backend.models[slot] = config.model.clone();
        backend.index = slot;
        backend.run_override = Some((slot, config.run_spec()));
        backend
    }

    fn run_spec(&self) -> RunSpec {
        match &self.run_override {
            Some((slot, spec)) if *slot == self.index => spec.clone(),
            _ => self.model().default_run(),
        }
    }
}

impl Default for CoreBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBackend for CoreBackend {
    fn model(&self) -> &ModelKind {
        &self.models[self.index]
    }

    fn next_model(&mut self) {
        self.index = (self.index + 1) % self.models.len();
        tracing::debug!(model = self.model().name(), "selected model");
    }

    fn set_current(&mut self, current: f64) -> bool {
        self.models[self.index].set_current(current)
    }

    fn simulate(&self) -> PlusResult<Trace> {
        Ok(self.model().simulate(&self.run_spec())?)
    }

    fn sweep(&self, sweep: &CurrentSweep) -> PlusResult<Vec<SweepFrame>> {
        run_sweep(self.model(), &self.run_spec(), sweep)
    }
}
