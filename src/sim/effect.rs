//! Shared effect plumbing: container bounds, per-step context, and the `Effect` trait

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Measured size of a section container (px)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Substitute fallback minimums for zero or unmeasurable dimensions
    pub fn with_fallback(self, min_width: f32, min_height: f32) -> Self {
        let pick = |v: f32, min: f32| if v.is_finite() { v.max(min) } else { min };
        Self {
            width: pick(self.width, min_width),
            height: pick(self.height, min_height),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Everything an effect may read or consume while stepping
pub struct StepContext<'a> {
    /// Elapsed time already scaled by the speed multiplier (seconds)
    pub dt: f32,
    /// Current speed multiplier
    pub speed: f32,
    pub rng: &'a mut Pcg32,
}

/// An independent animated behavior bound to one page section
pub trait Effect {
    /// Advance by one frame. Must be a no-op when the effect has no entities.
    fn step(&mut self, ctx: &mut StepContext<'_>);

    /// Recompute layout-dependent state from new container dimensions
    fn relayout(&mut self, area: Area, rng: &mut Pcg32);

    /// Number of animated entities
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
