//! Stockists section: a grid of boxes that periodically trade places

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::{Area, Effect, StepContext};
use crate::consts::*;

/// A stockist box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridBox {
    /// Home slot in the grid layout
    pub home: Vec2,
    /// Rendered offset: some box's home plus jitter
    pub offset: Vec2,
}

/// Grid dimensions and slot positions for a container
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub slots: Vec<Vec2>,
}

impl GridLayout {
    /// Lay out `count` boxes: 2 columns on narrow containers, 4 otherwise.
    ///
    /// Leftover space is spread evenly between and around the boxes, never
    /// closer than `STOCKIST_MIN_GAP`, and the grid is centered.
    pub fn compute(count: usize, area: Area) -> Self {
        let cols = if area.width <= STOCKIST_NARROW_WIDTH { 2 } else { 4 };
        let rows = count.div_ceil(cols);
        let box_size = Vec2::new(STOCKIST_BOX_WIDTH, STOCKIST_BOX_HEIGHT);

        let (start_x, gap_x) = Self::spread(area.width, cols, box_size.x);
        let (start_y, gap_y) = Self::spread(area.height, rows, box_size.y);

        let slots = (0..count)
            .map(|i| {
                let (r, c) = (i / cols, i % cols);
                Vec2::new(
                    start_x + c as f32 * (box_size.x + gap_x),
                    start_y + r as f32 * (box_size.y + gap_y),
                )
            })
            .collect();

        Self { cols, rows, slots }
    }

    /// Start offset and gap for `n` boxes of `extent` along a span of `total`
    fn spread(total: f32, n: usize, extent: f32) -> (f32, f32) {
        if n == 0 {
            return (0.0, 0.0);
        }
        let n_f = n as f32;
        let gap = ((total - n_f * extent) / (n_f + 1.0)).max(STOCKIST_MIN_GAP);
        let used = n_f * extent + (n_f - 1.0) * gap;
        let start = ((total - used) / 2.0).max(0.0);
        (start, gap)
    }
}

/// Periodically reshuffled grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shuffler {
    pub boxes: Vec<GridBox>,
    /// Milliseconds until the next reshuffle
    pub countdown_ms: f32,
    count: usize,
}

impl Shuffler {
    pub fn new(count: usize, area: Area) -> Self {
        let mut shuffler = Self {
            boxes: Vec::new(),
            countdown_ms: 0.0,
            count,
        };
        shuffler.layout(area);
        shuffler
    }

    fn layout(&mut self, area: Area) {
        let layout = GridLayout::compute(self.count, area);
        log::info!(
            "Stockist grid {}x{} for {}x{} area",
            layout.cols,
            layout.rows,
            area.width,
            area.height
        );
        self.boxes = layout
            .slots
            .into_iter()
            .map(|home| GridBox { home, offset: home })
            .collect();
    }

    /// Permute the home slots across boxes and add jitter
    pub fn reshuffle(&mut self, rng: &mut Pcg32) {
        let mut targets: Vec<Vec2> = self.boxes.iter().map(|b| b.home).collect();
        // Fisher-Yates
        for i in (1..targets.len()).rev() {
            let j = rng.random_range(0..=i);
            targets.swap(i, j);
        }
        for (gb, target) in self.boxes.iter_mut().zip(targets) {
            let jitter = Vec2::new(
                rng.random_range(-STOCKIST_JITTER..=STOCKIST_JITTER),
                rng.random_range(-STOCKIST_JITTER..=STOCKIST_JITTER),
            );
            gb.offset = target + jitter;
        }
        log::debug!("Reshuffled {} stockist boxes", self.boxes.len());
    }

    /// Interval before the next reshuffle at the given speed
    pub fn interval_ms(speed: f32) -> f32 {
        (SHUFFLE_BASE_MS / speed).max(SHUFFLE_MIN_MS)
    }
}

impl Effect for Shuffler {
    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.boxes.is_empty() {
            return;
        }
        self.countdown_ms -= ctx.dt * 1000.0 / ctx.speed;
        if self.countdown_ms <= 0.0 {
            self.reshuffle(ctx.rng);
            self.countdown_ms = Self::interval_ms(ctx.speed);
        }
    }

    /// Discard the grid and rebuild it for the new container
    fn relayout(&mut self, area: Area, _rng: &mut Pcg32) {
        self.layout(area);
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn step(shuffler: &mut Shuffler, rng: &mut Pcg32, dt: f32, speed: f32) {
        let mut ctx = StepContext { dt, speed, rng };
        shuffler.step(&mut ctx);
    }

    #[test]
    fn test_wide_layout_is_4x3() {
        let layout = GridLayout::compute(12, Area::new(1000.0, 400.0));
        assert_eq!((layout.cols, layout.rows), (4, 3));
        assert_eq!(layout.slots.len(), 12);
        // Centered: left margin equals right margin
        let left = layout.slots[0].x;
        let right = 1000.0 - (layout.slots[3].x + STOCKIST_BOX_WIDTH);
        assert!((left - right).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_layout_is_2x6() {
        let layout = GridLayout::compute(12, Area::new(400.0, 700.0));
        assert_eq!((layout.cols, layout.rows), (2, 6));
        assert_eq!(layout.slots[1].y, layout.slots[0].y);
        assert!(layout.slots[2].y > layout.slots[0].y);
    }

    #[test]
    fn test_cramped_layout_keeps_min_gap() {
        let layout = GridLayout::compute(12, Area::new(250.0, 100.0));
        let dx = layout.slots[1].x - layout.slots[0].x;
        assert!((dx - (STOCKIST_BOX_WIDTH + STOCKIST_MIN_GAP)).abs() < 1e-3);
        // Too wide to center: pinned to the left edge
        assert_eq!(layout.slots[0].x, 0.0);
        assert_eq!(layout.slots[0].y, 0.0);
    }

    #[test]
    fn test_first_step_reshuffles() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shuffler = Shuffler::new(12, Area::new(1000.0, 400.0));
        step(&mut shuffler, &mut rng, 0.016, 1.0);
        assert_eq!(shuffler.countdown_ms, 2000.0);
    }

    #[test]
    fn test_interval_scales_with_speed() {
        assert_eq!(Shuffler::interval_ms(1.0), 2000.0);
        assert_eq!(Shuffler::interval_ms(2.0), 1000.0);
        assert_eq!(Shuffler::interval_ms(4.0), 500.0);
        assert_eq!(Shuffler::interval_ms(0.5), 4000.0);
        assert_eq!(Shuffler::interval_ms(10.0), SHUFFLE_MIN_MS);
    }

    #[test]
    fn test_countdown_uses_unscaled_time() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shuffler = Shuffler::new(12, Area::new(1000.0, 400.0));
        step(&mut shuffler, &mut rng, 0.0, 2.0);
        assert_eq!(shuffler.countdown_ms, 1000.0);
        // 0.5 scaled seconds at 2x is 250ms of wall time
        step(&mut shuffler, &mut rng, 0.5, 2.0);
        assert!((shuffler.countdown_ms - 750.0).abs() < 1e-3);
    }

    #[test]
    fn test_relayout_rebuilds_grid() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shuffler = Shuffler::new(12, Area::new(1000.0, 400.0));
        shuffler.reshuffle(&mut rng);
        shuffler.relayout(Area::new(500.0, 700.0), &mut rng);
        let narrow = GridLayout::compute(12, Area::new(500.0, 700.0));
        let homes: Vec<Vec2> = shuffler.boxes.iter().map(|b| b.home).collect();
        assert_eq!(homes, narrow.slots);
        assert!(shuffler.boxes.iter().all(|b| b.offset == b.home));
    }

    #[test]
    fn test_empty_shuffler_is_noop() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut shuffler = Shuffler::new(0, Area::new(1000.0, 400.0));
        step(&mut shuffler, &mut rng, 1.0, 1.0);
        assert_eq!(shuffler.countdown_ms, 0.0);
    }

    proptest! {
        #[test]
        fn prop_reshuffle_is_permutation_plus_jitter(seed in any::<u64>(), w in 200.0f32..1600.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut shuffler = Shuffler::new(12, Area::new(w, 600.0));
            shuffler.reshuffle(&mut rng);

            let mut unused: Vec<Vec2> = shuffler.boxes.iter().map(|b| b.home).collect();
            for gb in &shuffler.boxes {
                let pos = unused.iter().position(|h| {
                    (gb.offset.x - h.x).abs() <= STOCKIST_JITTER + 1e-3
                        && (gb.offset.y - h.y).abs() <= STOCKIST_JITTER + 1e-3
                });
                prop_assert!(pos.is_some());
                unused.swap_remove(pos.unwrap());
            }
            prop_assert!(unused.is_empty());
        }
    }
}
