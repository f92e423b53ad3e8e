use neuro_core_plus::{detect_spikes, CurrentSweep};
use proptest::prelude::*;

proptest! {
    #[test]
    fn spikes_are_ordered_and_inside_the_run(signal in prop::collection::vec(-5.0f64..5.0, 2..200), thr in -3.0f64..3.0) {
        let time: Vec<f64> = (0..signal.len()).map(|i| i as f64 * 0.1).collect();
        let spikes = detect_spikes(&time, &signal, thr);
        // each crossing ends on a sample at or above threshold, so crossings cannot be adjacent
        prop_assert!(spikes.len() <= signal.len() / 2);
        prop_assert!(spikes.windows(2).all(|w| w[0] <= w[1]));
        for s in &spikes {
            prop_assert!(*s >= time[0] && *s <= time[time.len() - 1]);
        }
    }

    #[test]
    fn sweep_ladder_stays_within_bounds(start in -100.0f64..100.0, span in 0.0f64..100.0, step in 0.02f64..10.0) {
        let sweep = CurrentSweep::new(start, start + span, step).unwrap();
        let currents = sweep.currents();
        let stop = start + span;
        let tol = 1e-6 * step + 1e-9;
        prop_assert_eq!(currents.len(), sweep.len());
        prop_assert_eq!(currents[0], start);
        let last = currents[currents.len() - 1];
        prop_assert!(last <= stop + tol);
        prop_assert!(stop - last < step + tol);
    }
}
