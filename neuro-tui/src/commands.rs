// Headless subcommands: run a config once or sweep it, writing CSV to a file or stdout.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use neuro_core::ModelKind;
use neuro_core_plus::{
    fi_curve, hopf_envelope, run_sweep, write_fi_file, write_sweep_csv, write_sweep_file, write_trace_csv,
    write_trace_file, SimulationConfig, SpikeStats,
};

fn load(path: &Path) -> Result<SimulationConfig> {
    SimulationConfig::from_file(path).with_context(|| format!("loading {}", path.display()))
}

pub fn run(config: &Path, out: Option<&Path>) -> Result<()> {
    let cfg = load(config)?;
    let trace = cfg.model.simulate(&cfg.run_spec())?;
    let analysis = cfg.analysis();
    let stats = SpikeStats::from_trace(&trace, &analysis.variable, analysis.threshold)?;
    tracing::info!(
        model = cfg.model.name(),
        samples = trace.len(),
        spikes = stats.count,
        rate_hz = stats.firing_rate_hz,
        cv = ?stats.cv,
        "run complete"
    );

    match out {
        Some(path) => write_trace_file(&trace, path)?,
        None => write_trace_csv(&trace, io::stdout().lock())?,
    }
    Ok(())
}

pub fn sweep(config: &Path, out: Option<&Path>, fi: Option<&Path>) -> Result<()> {
    let cfg = load(config)?;
    let sweep = cfg.sweep.unwrap_or_default();
    let frames = run_sweep(&cfg.model, &cfg.run_spec(), &sweep)?;
    let analysis = cfg.analysis();

    let points = fi_curve(&frames, &analysis.variable, analysis.threshold)?;
    for p in &points {
        tracing::info!(current = p.current, spikes = p.spikes, rate_hz = p.rate_hz, "frame");
    }
    let envelope = hopf_envelope(&frames, &analysis.variable, analysis.transient)?;
    match envelope.iter().max_by(|a, b| a.amplitude().total_cmp(&b.amplitude())) {
        Some(peak) => tracing::info!(current = peak.current, amplitude = peak.amplitude(), "largest oscillation"),
        None => tracing::warn!("sweep produced no frames"),
    }

    match out {
        Some(path) => write_sweep_file(&frames, path)?,
        None => write_sweep_csv(&frames, io::stdout().lock())?,
    }
    if let Some(path) = fi {
        write_fi_file(&points, path)?;
    }
    Ok(())
}

pub fn models() {
    for m in ModelKind::catalogue() {
        let kind = match m.current() {
            Some(_) => "ode",
            None => "map",
        };
        println!("{:<26} [{kind}] {m}", m.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("sim.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn run_writes_trace() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(dir.path(), "[model]\nkind = \"hindmarsh_rose\"\n[run]\nduration = 10.0\n");
        let out = dir.path().join("hr.csv");
        run(&cfg, Some(&out)).unwrap();
        let text = fs::read_to_string(out).unwrap();
        assert!(text.starts_with("t,x,y,z\n"));
        assert_eq!(text.lines().count(), 1001);
    }

    #[test]
    fn sweep_writes_frames_and_fi() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(
            dir.path(),
            "[model]\nkind = \"izhikevich\"\n[run]\nduration = 50.0\n[sweep]\nstart = 0.0\nstop = 10.0\nstep = 5.0\n",
        );
        let out = dir.path().join("frames.csv");
        let fi = dir.path().join("fi.csv");
        sweep(&cfg, Some(&out), Some(&fi)).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap().lines().count(), 1 + 3 * 500);
        assert_eq!(fs::read_to_string(fi).unwrap().lines().count(), 4);
    }

    #[test]
    fn sweeping_a_map_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(dir.path(), "[model]\nkind = \"chialvo_map\"\n");
        assert!(sweep(&cfg, Some(&dir.path().join("x.csv")), None).is_err());
    }

    #[test]
    fn missing_config_mentions_path() {
        let err = run(Path::new("/nonexistent/sim.toml"), None).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sim.toml"));
    }
}
