use crate::atom::AtomModel;
use bevy::prelude::*;
use std::collections::VecDeque;

/// The one atom the app animates.
#[derive(Resource, Deref, DerefMut)]
pub struct AtomSketch(pub AtomModel);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub frame: f64,
    pub delta_ms: f64,
    pub phase: f64,
}

#[derive(Resource, Debug)]
pub struct FrameHistory {
    pub samples: VecDeque<FrameSample>,
    pub capacity: usize,
    frames: u64,
}

impl Default for FrameHistory {
    fn default() -> Self {
        Self::with_capacity(300)
    }
}

impl FrameHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            frames: 0,
        }
    }

    pub fn record(&mut self, delta_ms: f64, phase: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(FrameSample {
            frame: self.frames as f64,
            delta_ms,
            phase,
        });
        self.frames += 1;
    }

    pub fn mean_delta_ms(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f64 = self.samples.iter().map(|s| s.delta_ms).sum();
        Some(total / self.samples.len() as f64)
    }
}
