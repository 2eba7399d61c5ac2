//! Page simulation context
//!
//! Owns the clock, the RNG and every effect. Nothing here is global; the
//! driver holds one `Page` and passes it by `&mut` to `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bouncer::Bouncer;
use super::clock::Clock;
use super::effect::{Area, Effect};
use super::faller::Faller;
use super::hue::HueSpinner;
use super::shuffler::Shuffler;
use super::visibility::{RelayoutTicket, Section, Visibility};
use crate::settings::Settings;

/// Complete animation state for one page
#[derive(Debug, Clone)]
pub struct Page {
    pub seed: u64,
    pub clock: Clock,
    pub rng: Pcg32,
    pub visibility: Visibility,
    pub bouncer: Bouncer,
    pub hue: HueSpinner,
    pub shuffler: Shuffler,
    pub faller: Faller,
}

impl Page {
    /// Build every effect from settings, measuring containers with `measure`
    pub fn new(settings: &Settings, seed: u64, measure: impl Fn(Section) -> Area) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bouncer = Bouncer::new(
            settings.shop_image_urls.len(),
            measure(Section::Shop),
            &mut rng,
        );
        let hue = HueSpinner::new(&settings.about_text);
        let shuffler = Shuffler::new(settings.stockist_count, measure(Section::Stockists));
        let faller = Faller::new(&settings.interview_names, measure(Section::Interviews), &mut rng);

        log::info!(
            "Page initialized (seed {}): {} shop items, {} words, {} stockists, {} names",
            seed,
            bouncer.len(),
            hue.len(),
            shuffler.len(),
            faller.len()
        );

        Self {
            seed,
            clock: Clock::new(settings.initial_speed, settings.autoplay),
            rng,
            visibility: Visibility::new(),
            bouncer,
            hue,
            shuffler,
            faller,
        }
    }

    /// Replace the about text (the page may carry its own copy)
    pub fn set_about_text(&mut self, text: &str) {
        self.hue = HueSpinner::new(text);
    }

    /// Recompute one section's layout-dependent state
    pub fn relayout(&mut self, section: Section, area: Area) {
        let rng = &mut self.rng;
        match section {
            Section::Shop => self.bouncer.relayout(area, rng),
            Section::About => self.hue.relayout(area, rng),
            Section::Stockists => self.shuffler.relayout(area, rng),
            Section::Interviews => self.faller.relayout(area, rng),
        }
        log::info!(
            "Relayout {} at {}x{}",
            section.as_str(),
            area.width,
            area.height
        );
    }

    /// Show or hide a section; showing may hand back a deferred relayout ticket
    pub fn toggle_section(&mut self, section: Section) -> (bool, Option<RelayoutTicket>) {
        let (visible, ticket) = self.visibility.toggle(section);
        log::info!(
            "Section {} {}",
            section.as_str(),
            if visible { "shown" } else { "hidden" }
        );
        (visible, ticket)
    }

    /// Apply a deferred relayout if its ticket is still current
    pub fn redeem_relayout(&mut self, ticket: RelayoutTicket, area: Area) -> bool {
        if !self.visibility.redeem(ticket) {
            log::debug!("Stale relayout for {} dropped", ticket.section.as_str());
            return false;
        }
        self.relayout(ticket.section, area);
        true
    }

    /// Window resize: rebuild every visible section from fresh measurements.
    /// Hidden containers measure as zero and are left until they are shown.
    pub fn resize(&mut self, measure: impl Fn(Section) -> Area) {
        let visible: Vec<Section> = self.visibility.visible_sections().collect();
        for section in visible {
            self.relayout(section, measure(section));
        }
    }
}
