use std::sync::Arc;

use crate::domain::Sample;

/// Samples retained by the live dashboard
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

/// Fixed-capacity, copy-on-write window over the most recent samples.
///
/// Appending never mutates a published slice: it builds a new `Arc<[Sample]>`
/// from the retained tail plus the new sample, so readers holding a snapshot
/// keep a consistent view.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: Arc<[Sample]>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Arc::from(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Seed the window, keeping only the newest `capacity` samples.
    pub fn from_samples(samples: Vec<Sample>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let skip = samples.len().saturating_sub(capacity);
        Self {
            samples: samples.into_iter().skip(skip).collect(),
            capacity,
        }
    }

    /// New window holding this one's newest `capacity - 1` samples followed by `sample`.
    pub fn appended(&self, sample: Sample) -> Self {
        let keep = self.capacity - 1;
        let tail = &self.samples[self.samples.len().saturating_sub(keep)..];
        let mut next = Vec::with_capacity(tail.len() + 1);
        next.extend_from_slice(tail);
        next.push(sample);
        Self {
            samples: next.into(),
            capacity: self.capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        *self = self.appended(sample);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Shared handle to the current samples
    pub fn snapshot(&self) -> Arc<[Sample]> {
        Arc::clone(&self.samples)
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
