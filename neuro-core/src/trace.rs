//! Sampled simulation output: one time column plus one column per state variable.

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub time: Vec<f64>,
    pub names: Vec<&'static str>,
    /// Column-major samples, `columns[var][row]`.
    pub columns: Vec<Vec<f64>>,
    /// Times of threshold resets for models that reset their state (Izhikevich, LIF).
    pub spikes: Vec<f64>,
}

impl Trace {
    pub fn with_capacity(names: &[&'static str], rows: usize) -> Self {
        Self {
            time: Vec::with_capacity(rows),
            names: names.to_vec(),
            columns: names.iter().map(|_| Vec::with_capacity(rows)).collect(),
            spikes: Vec::new(),
        }
    }

    /// Append one sample. `state` must have one value per variable.
    pub fn push(&mut self, t: f64, state: &[f64]) {
        debug_assert_eq!(state.len(), self.columns.len());
        self.time.push(t);
        for (col, &x) in self.columns.iter_mut().zip(state) {
            col.push(x);
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    /// Last sampled time (0 for an empty trace).
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    pub fn variable(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|&n| n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// The first state variable (membrane potential for every model here).
    pub fn primary(&self) -> &[f64] {
        self.columns.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.len() {
            return None;
        }
        Some(self.columns.iter().map(|col| col[i]).collect())
    }

    pub fn final_state(&self) -> Option<Vec<f64>> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }
}
