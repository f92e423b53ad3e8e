//! Qualitative behaviour of each model over a full run.

use neuro_core::{
    FitzHughNagumo, HindmarshRose, HodgkinHuxley, Integrator, Izhikevich, LeakyIntegrateAndFire, ModelKind,
    MorrisLecar, OdeSystem, RulkovMap, RunSpec,
};

fn upward_crossings(signal: &[f64], level: f64) -> usize {
    signal.windows(2).filter(|w| w[0] < level && w[1] >= level).count()
}

#[test]
fn hodgkin_huxley_rests_without_input() {
    let hh = HodgkinHuxley::default();
    let m = ModelKind::HodgkinHuxley(hh);
    let spec = RunSpec { current: Some(0.0), initial_state: Some(hh.resting_state()), ..m.default_run() };
    let tr = m.simulate(&spec).unwrap();
    let v = tr.variable("V").unwrap();
    assert_eq!(upward_crossings(v, 0.0), 0);
    assert!(v.iter().all(|&x| x > -70.0 && x < -60.0));
}

#[test]
fn hodgkin_huxley_fires_tonically_with_strong_input() {
    let hh = HodgkinHuxley::default();
    let m = ModelKind::HodgkinHuxley(hh);
    let spec = RunSpec { current: Some(10.0), initial_state: Some(hh.resting_state()), ..m.default_run() };
    let tr = m.simulate(&spec).unwrap();
    let v = tr.variable("V").unwrap();
    let spikes = upward_crossings(v, 0.0);
    assert!((4..=10).contains(&spikes), "got {spikes} spikes");
    let peak = v.iter().cloned().fold(f64::MIN, f64::max);
    assert!(peak > 20.0 && peak < 60.0);
    // gates stay probabilities
    for name in ["m", "n", "h"] {
        assert!(tr.variable(name).unwrap().iter().all(|&g| (-1e-6..=1.0 + 1e-6).contains(&g)));
    }
}

#[test]
fn integrators_agree_on_hodgkin_huxley_spike_count() {
    let hh = HodgkinHuxley::default();
    let m = ModelKind::HodgkinHuxley(hh);
    let base = RunSpec { current: Some(10.0), initial_state: Some(hh.resting_state()), ..m.default_run() };
    let rk4 = m.simulate(&base).unwrap();
    let heun = m.simulate(&RunSpec { integrator: Integrator::Heun, ..base.clone() }).unwrap();
    assert_eq!(upward_crossings(rk4.primary(), 0.0), upward_crossings(heun.primary(), 0.0));
}

#[test]
fn fitzhugh_nagumo_settles_on_stable_branch() {
    // With fast recovery (phi = 12.5) the default cell relaxes onto a fixed point near V = 1.45
    let fhn = FitzHughNagumo::default();
    let m = ModelKind::FitzhughNagumo(fhn);
    let tr = m.simulate(&m.default_run()).unwrap();
    let v = tr.variable("V").unwrap();
    assert!(v.iter().all(|x| x.abs() < 3.0));
    assert_eq!(upward_crossings(v, 1.0), 1);

    let end = tr.final_state().unwrap();
    let mut d = [0.0; 2];
    fhn.derivatives(0.0, &end, fhn.current, &mut d);
    assert!(d[0].abs() < 1e-6 && d[1].abs() < 1e-6);
    assert!((end[0] - 1.449).abs() < 0.01);
}

#[test]
fn hindmarsh_rose_stays_bounded() {
    let m = ModelKind::HindmarshRose(HindmarshRose::default());
    let tr = m.simulate(&m.default_run()).unwrap();
    for col in &tr.columns {
        assert!(col.iter().all(|x| x.is_finite() && x.abs() < 50.0));
    }
}

#[test]
fn morris_lecar_stays_subthreshold_without_input() {
    let m = ModelKind::MorrisLecar(MorrisLecar::default());
    let spec = RunSpec { current: Some(0.0), initial_state: Some(vec![-60.0, 0.0]), duration: 500.0, ..m.default_run() };
    let tr = m.simulate(&spec).unwrap();
    assert!(tr.variable("V").unwrap().iter().all(|&v| v < -40.0));
}

#[test]
fn izhikevich_regular_spiking() {
    let quiet = ModelKind::Izhikevich(Izhikevich { current: 0.0, ..Izhikevich::regular_spiking() });
    let tr = quiet.simulate(&quiet.default_run()).unwrap();
    assert!(tr.spikes.is_empty());

    let driven = ModelKind::Izhikevich(Izhikevich::regular_spiking());
    let tr = driven.simulate(&driven.default_run()).unwrap();
    assert!(tr.spikes.len() >= 2, "got {} spikes", tr.spikes.len());
    assert!(tr.variable("V").unwrap().iter().all(|&v| v < 30.0));
    assert!(tr.spikes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn integrate_and_fire_spike_count_matches_period() {
    let lif = LeakyIntegrateAndFire::default();
    let m = ModelKind::LeakyIntegrateAndFire(lif);
    let tr = m.simulate(&RunSpec { duration: 1000.0, ..m.default_run() }).unwrap();
    let expected = 1000.0 / lif.period().unwrap();
    assert!((tr.spikes.len() as f64 - expected).abs() <= 1.5);
}

#[test]
fn rulkov_map_produces_spikes() {
    let m = ModelKind::RulkovMap(RulkovMap::default());
    let tr = m.simulate(&RunSpec { duration: 500.0, ..m.default_run() }).unwrap();
    assert_eq!(tr.len(), 500);
    assert!(tr.primary().iter().all(|x| x.is_finite()));
    assert!(tr.primary().iter().any(|&x| x == -1.0 || x > 0.0));
}
