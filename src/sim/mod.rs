//! Deterministic page simulation
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time enters only through `tick`/`frame`
//! - No DOM or platform dependencies

pub mod bouncer;
pub mod clock;
pub mod effect;
pub mod faller;
pub mod hue;
pub mod shuffler;
pub mod state;
pub mod tick;
pub mod visibility;

pub use bouncer::{BounceItem, Bouncer};
pub use clock::Clock;
pub use effect::{Area, Effect, StepContext};
pub use faller::{Faller, FallingLabel};
pub use hue::{HueSpinner, SpinWord};
pub use shuffler::{GridBox, GridLayout, Shuffler};
pub use state::Page;
pub use tick::{frame, tick};
pub use visibility::{RelayoutTicket, Section, Visibility};
