//! Frame loop driver
//!
//! At most one frame request is outstanding at any time. Pausing cancels it;
//! resuming requests exactly one new frame no matter how often it is called.

use crate::sim::{Page, frame};

/// Source of "next frame" callbacks
pub trait FrameScheduler {
    type Handle: Copy + std::fmt::Debug;

    /// Ask for one frame callback. `None` if the platform refused.
    fn request(&mut self) -> Option<Self::Handle>;

    /// Withdraw an outstanding request
    fn cancel(&mut self, handle: Self::Handle);
}

/// Owns the page and keeps the frame loop alive while playing
pub struct Driver<S: FrameScheduler> {
    pub page: Page,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> Driver<S> {
    /// Wrap a page; schedules the first frame if the clock is playing
    pub fn new(page: Page, scheduler: S) -> Self {
        let mut driver = Self {
            page,
            scheduler,
            pending: None,
        };
        if driver.page.clock.is_playing() {
            driver.schedule();
        }
        driver
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = self.scheduler.request();
            if self.pending.is_none() {
                log::warn!("Frame request refused; animation stalled");
            }
        }
    }

    /// Frame callback: step the page, then re-arm while playing
    pub fn run_frame(&mut self, timestamp_ms: f64) -> bool {
        self.pending = None;
        let advanced = frame(&mut self.page, timestamp_ms);
        if self.page.clock.is_playing() {
            self.schedule();
        }
        advanced
    }

    /// Resume playback (no-op if already playing)
    pub fn play(&mut self) {
        if self.page.clock.resume() {
            log::info!("Playing");
            self.schedule();
        }
    }

    /// Pause playback (no-op if already paused)
    pub fn pause(&mut self) {
        if self.page.clock.pause() {
            log::info!("Paused");
            if let Some(handle) = self.pending.take() {
                self.scheduler.cancel(handle);
            }
        }
    }

    /// Play/pause button; returns the new playing state
    pub fn toggle_play(&mut self) -> bool {
        if self.page.clock.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        self.page.clock.is_playing()
    }

    /// Set the speed multiplier (clamped)
    pub fn set_speed(&mut self, speed: f32) {
        self.page.clock.set_speed(speed);
        log::info!("Speed {}", self.page.clock.speed_label());
    }

    pub fn speed_up(&mut self) {
        self.page.clock.speed_up();
        log::info!("Speed {}", self.page.clock.speed_label());
    }

    pub fn slow_down(&mut self) {
        self.page.clock.slow_down();
        log::info!("Speed {}", self.page.clock.speed_label());
    }
}

/// Scheduler for hosts that pump frames themselves (native runs, tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u32,
    outstanding: Option<u32>,
    pub requests: u32,
    pub cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame callback is waiting to be delivered
    pub fn is_armed(&self) -> bool {
        self.outstanding.is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request(&mut self) -> Option<u32> {
        self.next_handle += 1;
        self.requests += 1;
        self.outstanding = Some(self.next_handle);
        Some(self.next_handle)
    }

    fn cancel(&mut self, handle: u32) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.cancels += 1;
    }
}

impl Driver<ManualScheduler> {
    /// Deliver the outstanding frame, if any. Returns false when the loop is idle.
    pub fn pump(&mut self, timestamp_ms: f64) -> bool {
        if self.scheduler.outstanding.take().is_none() {
            return false;
        }
        self.run_frame(timestamp_ms);
        true
    }
}
