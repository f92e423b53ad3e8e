//! Discrete-time neuron maps, iterated one integer tick at a time.

use crate::error::{ensure_finite, ModelError, ModelResult};
use crate::Trace;

pub trait DiscreteMap {
    fn name(&self) -> &'static str;

    fn variable_names(&self) -> &'static [&'static str];

    fn initial_state(&self) -> Vec<f64>;

    /// Compute the next state from `state` into `out`.
    fn iterate(&self, state: &[f64], out: &mut [f64]);

    fn dim(&self) -> usize {
        self.variable_names().len()
    }
}

/// Iterate `map` from `x0`, producing `steps` rows at times `0..steps`.
pub fn iterate_map<M: DiscreteMap + ?Sized>(map: &M, steps: usize, x0: &[f64]) -> ModelResult<Trace> {
    let dim = map.dim();
    if x0.len() != dim {
        return Err(ModelError::StateDimension { expected: dim, got: x0.len() });
    }
    if steps == 0 {
        return Err(ModelError::InvalidParameter {
            name: "steps",
            reason: "must be at least 1".to_string(),
        });
    }
    for &x in x0 {
        ensure_finite("initial_state", x)?;
    }

    let mut trace = Trace::with_capacity(map.variable_names(), steps);
    let mut state = x0.to_vec();
    let mut next = vec![0.0; dim];
    trace.push(0.0, &state);

    for n in 1..steps {
        map.iterate(&state, &mut next);
        if next.iter().any(|x| !x.is_finite()) {
            tracing::warn!(model = map.name(), step = n, "map diverged");
            return Err(ModelError::Diverged { time: n as f64 });
        }
        core::mem::swap(&mut state, &mut next);
        trace.push(n as f64, &state);
    }

    Ok(trace)
}
