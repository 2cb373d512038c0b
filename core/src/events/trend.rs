use crate::math::regression::LinearFit;
use std::collections::VecDeque;

/// Rolling least-squares trend over the most recent `capacity` values.
///
/// Storage is reserved up front; pushing past capacity drops the oldest value.
pub struct TrendEstimator {
    history: VecDeque<f32>,
    scratch: Vec<f32>,
    capacity: usize,
}

impl TrendEstimator {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            scratch: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) -> LinearFit {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(value);
        self.fit()
    }

    /// Fit over the current history, oldest value at `x = 0`.
    pub fn fit(&mut self) -> LinearFit {
        self.scratch.clear();
        self.scratch.extend(self.history.iter().copied());
        LinearFit::compute(&self.scratch)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
