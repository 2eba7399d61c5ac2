//! Interviews section: names falling down the container and re-entering at the top

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::{Area, Effect, StepContext};
use crate::consts::*;

/// A falling interview name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingLabel {
    pub text: String,
    pub pos: Vec2,
    /// Fall speed (px/s at 1x)
    pub speed: f32,
}

/// Random x within the placeable width of `area`
fn random_x(area: Area, rng: &mut Pcg32) -> f32 {
    rng.random::<f32>() * (area.width - FALL_X_MARGIN).max(1.0)
}

/// Falling labels effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Faller {
    pub labels: Vec<FallingLabel>,
    area: Area,
}

impl Faller {
    /// Scatter `names` across the area, each starting somewhere above the top edge
    pub fn new<S: AsRef<str>>(names: &[S], area: Area, rng: &mut Pcg32) -> Self {
        let area = area.with_fallback(FALL_MIN_WIDTH, FALL_MIN_HEIGHT);
        let labels = names
            .iter()
            .map(|name| {
                let x = random_x(area, rng);
                let y = -rng.random::<f32>() * area.height;
                FallingLabel {
                    text: name.as_ref().to_string(),
                    pos: Vec2::new(x, y),
                    speed: FALL_MIN_SPEED + rng.random::<f32>() * FALL_SPEED_SPREAD,
                }
            })
            .collect();
        Self { labels, area }
    }

    pub fn area(&self) -> Area {
        self.area
    }
}

impl Effect for Faller {
    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.labels.is_empty() {
            return;
        }
        let area = self.area;
        for label in &mut self.labels {
            // `dt` is already speed-scaled; the extra factor is the page's observed behavior
            label.pos.y += label.speed * ctx.dt * ctx.speed;
            if label.pos.y > area.height + FALL_WRAP_OVERSHOOT {
                label.pos.y = -FALL_REENTRY_OFFSET - ctx.rng.random::<f32>() * FALL_REENTRY_SPREAD;
                label.pos.x = random_x(area, ctx.rng);
                log::debug!("Label {:?} wrapped to x={:.1}", label.text, label.pos.x);
            }
        }
    }

    /// Adopt the new bounds; labels stranded past the right margin get a fresh x
    fn relayout(&mut self, area: Area, rng: &mut Pcg32) {
        self.area = area.with_fallback(FALL_MIN_WIDTH, FALL_MIN_HEIGHT);
        let max_x = (self.area.width - FALL_X_MARGIN).max(1.0);
        for label in &mut self.labels {
            if label.pos.x > max_x {
                label.pos.x = random_x(self.area, rng);
            }
        }
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}
