//! About section: hue-rotating text block with one word spinning at a time

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effect::{Area, Effect, StepContext};
use crate::consts::*;
use crate::wrap_degrees;

/// A word of the about text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinWord {
    pub text: String,
    /// Current rotation (degrees, [0, 360))
    pub rotation: f32,
    /// Angular speed (degrees/s); nonzero for at most one word
    pub speed: f32,
}

impl SpinWord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rotation: 0.0,
            speed: 0.0,
        }
    }

    fn reset(&mut self) {
        self.rotation = 0.0;
        self.speed = 0.0;
    }
}

/// Hue rotation plus periodic word spin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HueSpinner {
    /// Filter hue (degrees, [0, 360))
    pub hue: f32,
    pub words: Vec<SpinWord>,
    /// Scaled seconds since the last spin pick
    spin_timer: f32,
    /// Index of the word currently spinning
    active: Option<usize>,
}

impl HueSpinner {
    /// Split `text` on whitespace into spin words
    pub fn new(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(SpinWord::new).collect(),
            ..Default::default()
        }
    }

    pub fn active_word(&self) -> Option<usize> {
        self.active
    }

    /// Stop every word, then start a uniformly chosen one
    fn pick_word(&mut self, rng: &mut Pcg32) {
        self.words.iter_mut().for_each(SpinWord::reset);
        let idx = rng.random_range(0..self.words.len());
        self.words[idx].speed = WORD_SPIN_SPEED;
        self.active = Some(idx);
        log::debug!("Spinning word {} ({:?})", idx, self.words[idx].text);
    }
}

impl Effect for HueSpinner {
    fn step(&mut self, ctx: &mut StepContext<'_>) {
        if self.words.is_empty() {
            return;
        }
        let dt = ctx.dt;
        self.hue = wrap_degrees(self.hue + HUE_RATE * dt);

        if let Some(word) = self.active.and_then(|i| self.words.get_mut(i)) {
            word.rotation = wrap_degrees(word.rotation + word.speed * dt);
        }

        // Threshold is in scaled time, so the effective period shrinks as speed grows
        self.spin_timer += dt;
        if self.spin_timer >= WORD_SPIN_PERIOD {
            self.spin_timer = 0.0;
            self.pick_word(ctx.rng);
        }
    }

    fn relayout(&mut self, _area: Area, _rng: &mut Pcg32) {}

    fn len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const TEXT: &str = "We are a small label with big ideas";

    fn step(spinner: &mut HueSpinner, rng: &mut Pcg32, dt: f32) {
        let mut ctx = StepContext { dt, speed: 1.0, rng };
        spinner.step(&mut ctx);
    }

    #[test]
    fn test_splits_words() {
        let spinner = HueSpinner::new("  hello   brave\nnew world ");
        let words: Vec<&str> = spinner.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, ["hello", "brave", "new", "world"]);
    }

    #[test]
    fn test_hue_advances_and_wraps() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spinner = HueSpinner::new(TEXT);
        step(&mut spinner, &mut rng, 1.0);
        assert!((spinner.hue - 30.0).abs() < 1e-4);
        spinner.hue = 350.0;
        step(&mut spinner, &mut rng, 1.0);
        assert!((spinner.hue - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_word_spins_before_first_period() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spinner = HueSpinner::new(TEXT);
        step(&mut spinner, &mut rng, 1.0);
        assert_eq!(spinner.active_word(), None);
        assert!(spinner.words.iter().all(|w| w.speed == 0.0 && w.rotation == 0.0));
    }

    #[test]
    fn test_word_picked_after_period() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spinner = HueSpinner::new(TEXT);
        step(&mut spinner, &mut rng, 1.5);
        let idx = spinner.active_word().expect("a word should spin");
        assert_eq!(spinner.words[idx].speed, WORD_SPIN_SPEED);
        assert_eq!(spinner.words[idx].rotation, 0.0);

        step(&mut spinner, &mut rng, 0.25);
        assert!((spinner.words[idx].rotation - 90.0).abs() < 1e-3);
        for (i, w) in spinner.words.iter().enumerate() {
            if i != idx {
                assert_eq!(w.rotation, 0.0);
            }
        }
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spinner = HueSpinner::new("   ");
        step(&mut spinner, &mut rng, 10.0);
        assert_eq!(spinner.hue, 0.0);
        assert!(spinner.is_empty());
    }

    proptest! {
        #[test]
        fn prop_single_spinner_and_hue_range(
            seed in any::<u64>(),
            steps in prop::collection::vec(0.0f32..2.0, 1..300),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spinner = HueSpinner::new(TEXT);
            for dt in steps {
                step(&mut spinner, &mut rng, dt);
                let spinning = spinner.words.iter().filter(|w| w.speed != 0.0).count();
                prop_assert!(spinning <= 1);
                prop_assert!((0.0..360.0).contains(&spinner.hue));
                for w in &spinner.words {
                    prop_assert!((0.0..360.0).contains(&w.rotation));
                }
            }
        }
    }
}
