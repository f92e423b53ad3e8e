//! neuro-core-plus: analysis and I/O atop neuro-core (keeps neuro-core free of file formats)
//!
//! Additions:
//! - Spike detection and firing statistics over any trace variable
//! - Current sweeps, run in parallel under feature "parallel" (default)
//! - F-I curves and post-transient oscillation envelopes from sweep frames
//! - TOML run configuration layered over each model's defaults
//! - CSV export for traces, sweeps and F-I curves
//!
//! This crate composes neuro-core's models and reuses its `RunSpec`/`Trace` semantics.

pub mod config;
pub mod error;
pub mod export;
pub mod spikes;
pub mod sweep;

// Re-exports
pub use config::{AnalysisSection, ResolvedAnalysis, RunSection, SimulationConfig};
pub use error::{PlusError, PlusResult};
pub use export::{
    write_fi_csv, write_fi_file, write_sweep_csv, write_sweep_file, write_trace_csv, write_trace_file,
};
pub use spikes::{detect_spikes, envelope, spike_times, SpikeStats};
pub use sweep::{fi_curve, hopf_envelope, run_sweep, CurrentSweep, EnvelopePoint, FiPoint, SweepFrame, MAX_FRAMES};
