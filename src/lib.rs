//! Superstars - decorative page animator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, effects, visibility)
//! - `platform`: Frame scheduling abstraction over requestAnimationFrame
//! - `settings`: Page configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Animation configuration constants
pub mod consts {
    /// Speed multiplier bounds
    pub const MIN_SPEED: f32 = 0.15;
    pub const MAX_SPEED: f32 = 4.0;
    /// Multipliers applied by the fast/slow buttons
    pub const SPEED_UP_FACTOR: f32 = 1.25;
    pub const SLOW_DOWN_FACTOR: f32 = 0.75;

    /// Shop item size (px)
    pub const SHOP_ITEM_WIDTH: f32 = 90.0;
    pub const SHOP_ITEM_HEIGHT: f32 = 140.0;
    /// Shop item speed range (px/s)
    pub const SHOP_MIN_SPEED: f32 = 80.0;
    pub const SHOP_SPEED_SPREAD: f32 = 120.0;

    /// About text hue rotation rate (degrees/s)
    pub const HUE_RATE: f32 = 30.0;
    /// Seconds between word-spin picks (in scaled time)
    pub const WORD_SPIN_PERIOD: f32 = 1.5;
    /// Angular speed of the spinning word (degrees/s)
    pub const WORD_SPIN_SPEED: f32 = 360.0;

    /// Stockist box size and minimum gap (px)
    pub const STOCKIST_BOX_WIDTH: f32 = 120.0;
    pub const STOCKIST_BOX_HEIGHT: f32 = 70.0;
    pub const STOCKIST_MIN_GAP: f32 = 12.0;
    /// Containers at or below this width use the narrow 2x6 grid
    pub const STOCKIST_NARROW_WIDTH: f32 = 800.0;
    /// Max jitter per axis added on reshuffle (px)
    pub const STOCKIST_JITTER: f32 = 10.0;
    /// Reshuffle interval at 1x and its floor (ms)
    pub const SHUFFLE_BASE_MS: f32 = 2000.0;
    pub const SHUFFLE_MIN_MS: f32 = 400.0;

    /// Interview label fall speed range (px/s)
    pub const FALL_MIN_SPEED: f32 = 30.0;
    pub const FALL_SPEED_SPREAD: f32 = 80.0;
    /// Distance past the bottom edge before a label wraps
    pub const FALL_WRAP_OVERSHOOT: f32 = 40.0;
    /// Right-hand margin kept free when placing labels
    pub const FALL_X_MARGIN: f32 = 40.0;
    /// Labels re-enter at -(20 + U[0, 100))
    pub const FALL_REENTRY_OFFSET: f32 = 20.0;
    pub const FALL_REENTRY_SPREAD: f32 = 100.0;
    /// Fallback area when the interviews container is not laid out
    pub const FALL_MIN_WIDTH: f32 = 300.0;
    pub const FALL_MIN_HEIGHT: f32 = 200.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
