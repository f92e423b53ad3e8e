//! TOML run configuration.
//!
//! ```toml
//! [model]
//! kind = "hodgkin_huxley"
//! current = 10.0
//!
//! [run]
//! duration = 100.0
//! dt = 0.01
//! initial_state = [-65.0, 0.05, 0.32, 0.6]
//!
//! [sweep]
//! start = -5.0
//! stop = 10.0
//! step = 1.0
//!
//! [analysis]
//! variable = "V"
//! threshold = 0.0
//! ```
//!
//! Missing model parameters take the model's defaults; missing `[run]` keys take the
//! model's default run settings.

use std::path::Path;

use neuro_core::{Integrator, ModelKind, RunSpec};
use serde::{Deserialize, Serialize};

use crate::error::{PlusError, PlusResult};
use crate::sweep::CurrentSweep;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub model: ModelKind,
    #[serde(default)]
    pub run: RunSection,
    pub sweep: Option<CurrentSweep>,
    pub analysis: Option<AnalysisSection>,
}

/// Per-key overrides of `ModelKind::default_run()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSection {
    pub duration: Option<f64>,
    pub dt: Option<f64>,
    pub integrator: Option<Integrator>,
    pub substeps: Option<usize>,
    pub initial_state: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Variable to analyse; defaults to the model's first state variable. Recorded resets
    /// (Izhikevich, LIF) only stand in for threshold crossings on that first variable.
    pub variable: Option<String>,
    /// Spike threshold; defaults to the model's own.
    pub threshold: Option<f64>,
    /// Time to discard before measuring envelopes; must be shorter than the run.
    #[serde(default)]
    pub transient: f64,
}

/// Analysis settings with every default filled in.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAnalysis {
    pub variable: String,
    pub threshold: f64,
    pub transient: f64,
}

impl SimulationConfig {
    pub fn for_model(model: ModelKind) -> Self {
        Self { model, run: RunSection::default(), sweep: None, analysis: None }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> PlusResult<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlusResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlusResult<()> {
        self.model.validate()?;
        let spec = self.run_spec();
        if !(spec.duration.is_finite() && spec.duration > 0.0) {
            return Err(PlusError::config("run.duration", format!("must be positive, got {}", spec.duration)));
        }
        if !(spec.dt.is_finite() && spec.dt > 0.0) {
            return Err(PlusError::config("run.dt", format!("must be positive, got {}", spec.dt)));
        }
        if spec.substeps == 0 {
            return Err(PlusError::config("run.substeps", "must be at least 1"));
        }
        if let Some(x0) = &spec.initial_state {
            let dim = self.model.variable_names().len();
            if x0.len() != dim {
                return Err(PlusError::config(
                    "run.initial_state",
                    format!("{} expects {} values, got {}", self.model.name(), dim, x0.len()),
                ));
            }
        }
        if let Some(sweep) = &self.sweep {
            if self.model.is_map() {
                return Err(PlusError::config("sweep", "maps have no injected current to sweep"));
            }
            sweep.validate()?;
        }
        let analysis = self.analysis();
        if !(analysis.transient.is_finite() && analysis.transient >= 0.0 && analysis.transient < spec.duration) {
            return Err(PlusError::config(
                "analysis.transient",
                format!("must lie in [0, {}), got {}", spec.duration, analysis.transient),
            ));
        }
        if !self.model.variable_names().contains(&analysis.variable.as_str()) {
            return Err(PlusError::UnknownVariable(analysis.variable));
        }
        Ok(())
    }

    /// The model's default run with `[run]` overrides applied.
    pub fn run_spec(&self) -> RunSpec {
        let base = self.model.default_run();
        let dt = if self.model.is_map() { base.dt } else { self.run.dt.unwrap_or(base.dt) };
        RunSpec {
            duration: self.run.duration.unwrap_or(base.duration),
            dt,
            current: None,
            initial_state: self.run.initial_state.clone(),
            integrator: self.run.integrator.unwrap_or(base.integrator),
            substeps: self.run.substeps.unwrap_or(base.substeps),
        }
    }

    pub fn analysis(&self) -> ResolvedAnalysis {
        let section = self.analysis.clone().unwrap_or_default();
        ResolvedAnalysis {
            variable: section
                .variable
                .unwrap_or_else(|| self.model.variable_names()[0].to_string()),
            threshold: section.threshold.unwrap_or_else(|| self.model.spike_threshold()),
            transient: section.transient,
        }
    }
}
