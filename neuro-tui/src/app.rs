// Application state for the TUI: the selected model's trace plus an optional current sweep.

use std::path::PathBuf;

use neuro_core::Trace;
use neuro_core_plus::{write_trace_file, CurrentSweep, SpikeStats, SweepFrame};

use crate::backend::SimBackend;

pub struct App<B: SimBackend> {
    pub backend: B,
    pub trace: Option<Trace>,
    pub stats: Option<SpikeStats>,
    pub sweep: CurrentSweep,
    /// Computed lazily on the first sweep step; cleared whenever the model changes.
    pub frames: Vec<SweepFrame>,
    /// Frame on screen, if the sweep is being shown.
    pub frame: Option<usize>,
    pub running: bool,
    /// Increment for `+`/`-`.
    pub current_step: f64,
    pub export_dir: PathBuf,
    pub status: String,
}

impl<B: SimBackend> App<B> {
    pub fn new(backend: B, sweep: CurrentSweep, export_dir: PathBuf) -> Self {
        let mut app = Self {
            backend,
            trace: None,
            stats: None,
            sweep,
            frames: Vec::new(),
            frame: None,
            running: false,
            current_step: 0.5,
            export_dir,
            status: String::new(),
        };
        app.refresh();
        app
    }

    /// Re-simulate the selected model and recompute spike statistics.
    pub fn refresh(&mut self) {
        match self.backend.simulate() {
            Ok(trace) => self.show(trace),
            Err(err) => {
                tracing::warn!(model = self.backend.model().name(), %err, "simulation failed");
                self.trace = None;
                self.stats = None;
                self.status = format!("error: {err}");
            }
        }
    }

    fn show(&mut self, trace: Trace) {
        let model = self.backend.model();
        let variable = model.variable_names()[0];
        self.stats = SpikeStats::from_trace(&trace, variable, model.spike_threshold()).ok();
        self.trace = Some(trace);
        self.status.clear();
    }

    pub fn next_model(&mut self) {
        self.backend.next_model();
        self.reset_sweep();
        self.refresh();
    }

    pub fn adjust_current(&mut self, delta: f64) {
        let Some(current) = self.backend.model().current() else {
            self.status = "maps have no injected current".to_string();
            return;
        };
        self.backend.set_current(current + delta);
        self.reset_sweep();
        self.refresh();
    }

    /// Show the next frame of the current sweep, computing the sweep first if needed.
    pub fn step_sweep(&mut self) {
        if self.backend.model().is_map() {
            self.running = false;
            self.status = "maps cannot be swept".to_string();
            return;
        }
        if self.frames.is_empty() {
            match self.backend.sweep(&self.sweep) {
                Ok(frames) => self.frames = frames,
                Err(err) => {
                    self.running = false;
                    self.status = format!("error: {err}");
                    return;
                }
            }
        }
        if self.frames.is_empty() {
            self.running = false;
            self.status = "sweep produced no frames".to_string();
            return;
        }
        let next = self.frame.map_or(0, |i| (i + 1) % self.frames.len());
        let trace = self.frames[next].trace.clone();
        self.frame = Some(next);
        self.show(trace);
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Called once per UI tick.
    pub fn on_tick(&mut self) {
        if self.running {
            self.step_sweep();
        }
    }

    /// Injected current of what is on screen.
    pub fn shown_current(&self) -> Option<f64> {
        match self.frame {
            Some(i) => self.frames.get(i).map(|f| f.current),
            None => self.backend.model().current(),
        }
    }

    /// Write the trace on screen to `<export_dir>/<kind>.csv`.
    pub fn export(&mut self) {
        let Some(trace) = &self.trace else {
            self.status = "nothing to export".to_string();
            return;
        };
        let stem: String = self
            .backend
            .model()
            .name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let path = match self.shown_current() {
            Some(i) => self.export_dir.join(format!("{stem}_I{i}.csv")),
            None => self.export_dir.join(format!("{stem}.csv")),
        };
        self.status = match write_trace_file(trace, &path) {
            Ok(()) => format!("wrote {}", path.display()),
            Err(err) => format!("export failed: {err}"),
        };
    }

    /// First state variable against time, thinned to at most `max_points` points.
    pub fn chart_points(&self, max_points: usize) -> Vec<(f64, f64)> {
        let Some(trace) = &self.trace else {
            return Vec::new();
        };
        let stride = trace.len().div_ceil(max_points.max(1)).max(1);
        trace
            .time
            .iter()
            .zip(trace.primary())
            .step_by(stride)
            .map(|(&t, &v)| (t, v))
            .collect()
    }

    /// `([t_min, t_max], [y_min, y_max])` of the plotted points, padded so flat lines stay visible.
    pub fn bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
        if points.is_empty() {
            return ([0.0, 1.0], [0.0, 1.0]);
        }
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(_, y) in points {
            lo = lo.min(y);
            hi = hi.max(y);
        }
        let pad = ((hi - lo) * 0.05).max(1e-3);
        let t0 = points[0].0;
        let t1 = points[points.len() - 1].0.max(t0 + 1e-9);
        ([t0, t1], [lo - pad, hi + pad])
    }

    fn reset_sweep(&mut self) {
        self.frames.clear();
        self.frame = None;
        self.running = false;
    }
}
