// Rolling sample windows backing the trend graphs

use std::collections::VecDeque;

/// The most recent `capacity` samples of one metric, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `value`, evicting the oldest sample once the window is full.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Graph ceiling: the largest sample, or 1 when nothing is above zero.
    pub fn max_or_one(&self) -> f64 {
        let max = self.values().fold(f64::NEG_INFINITY, f64::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Quantizes the window into `height` bands, top row first.
    ///
    /// Row `r` (1-based from the top) is filled for a sample `v` when
    /// `v >= (max / height) * (height - r + 1)`.
    pub fn trend_rows(&self, height: usize) -> Vec<Vec<bool>> {
        let max = self.max_or_one();
        let band = max / height as f64;

        (1..=height)
            .map(|row| {
                let threshold = band * (height - row + 1) as f64;
                self.values().map(|v| v >= threshold).collect()
            })
            .collect()
    }
}
