//! Shop section: images drifting around and bouncing off the container walls

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::{Area, Effect, StepContext};
use crate::consts::*;

/// A bouncing shop image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BounceItem {
    /// Top-left corner (px, relative to the container)
    pub pos: Vec2,
    /// Velocity (px/s at 1x)
    pub vel: Vec2,
    pub size: Vec2,
}

impl BounceItem {
    /// Random position inside `area` with a random heading
    pub fn random(area: Area, rng: &mut Pcg32) -> Self {
        let size = Vec2::new(SHOP_ITEM_WIDTH, SHOP_ITEM_HEIGHT);
        let x = rng.random::<f32>() * (area.width - size.x).max(1.0);
        let y = rng.random::<f32>() * (area.height - size.y).max(1.0);
        let speed = SHOP_MIN_SPEED + rng.random::<f32>() * SHOP_SPEED_SPREAD;
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size,
        }
    }

    /// Integrate and resolve wall hits independently per axis
    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos += self.vel * dt;
        for axis in 0..2 {
            if self.pos[axis] < 0.0 {
                self.pos[axis] = 0.0;
                self.vel[axis] = -self.vel[axis];
            } else if self.pos[axis] + self.size[axis] > bounds[axis] {
                self.pos[axis] = (bounds[axis] - self.size[axis]).max(0.0);
                self.vel[axis] = -self.vel[axis];
            }
        }
    }
}

/// Bouncing images effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bouncer {
    pub items: Vec<BounceItem>,
    area: Area,
}

impl Bouncer {
    pub fn new(count: usize, area: Area, rng: &mut Pcg32) -> Self {
        let area = area.with_fallback(SHOP_ITEM_WIDTH, SHOP_ITEM_HEIGHT);
        let items = (0..count).map(|_| BounceItem::random(area, rng)).collect();
        Self { items, area }
    }

    pub fn area(&self) -> Area {
        self.area
    }
}

impl Effect for Bouncer {
    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.items.is_empty() {
            return;
        }
        let bounds = self.area.size();
        for item in &mut self.items {
            item.advance(ctx.dt, bounds);
        }
    }

    /// Only the collision bounds change; items keep their current positions
    /// and are pulled back inside on their next wall hit.
    fn relayout(&mut self, area: Area, _rng: &mut Pcg32) {
        self.area = area.with_fallback(SHOP_ITEM_WIDTH, SHOP_ITEM_HEIGHT);
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
