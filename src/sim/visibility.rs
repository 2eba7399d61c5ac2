//! Section show/hide state and debounced relayout requests

use serde::{Deserialize, Serialize};

/// Named page sections, one per effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Shop,
    About,
    Stockists,
    Interviews,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Shop,
        Section::About,
        Section::Stockists,
        Section::Interviews,
    ];

    /// DOM id of the section container (also the category button's `data-target`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Shop => "shop",
            Section::About => "about",
            Section::Stockists => "stockists",
            Section::Interviews => "interviews",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shop" => Some(Section::Shop),
            "about" => Some(Section::About),
            "stockists" => Some(Section::Stockists),
            "interviews" => Some(Section::Interviews),
            _ => None,
        }
    }

    /// Whether this section's effect has state derived from container size
    /// (collision bounds, grid slots, label bounds)
    pub fn layout_dependent(&self) -> bool {
        !matches!(self, Section::About)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Handle for a deferred relayout; only the newest ticket per section is honored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayoutTicket {
    pub section: Section,
    generation: u32,
}

/// Visibility of every section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Visibility {
    visible: [bool; 4],
    #[serde(skip)]
    generations: [u32; 4],
}

impl Visibility {
    /// All sections start hidden
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.visible[section.index()]
    }

    /// Show a section. Layout-dependent sections get a relayout ticket to
    /// redeem once the container has been laid out.
    pub fn show(&mut self, section: Section) -> Option<RelayoutTicket> {
        self.visible[section.index()] = true;
        if !section.layout_dependent() {
            return None;
        }
        let generation = &mut self.generations[section.index()];
        *generation = generation.wrapping_add(1);
        Some(RelayoutTicket {
            section,
            generation: *generation,
        })
    }

    pub fn hide(&mut self, section: Section) {
        self.visible[section.index()] = false;
    }

    /// Flip a section; returns the new visibility and any relayout ticket
    pub fn toggle(&mut self, section: Section) -> (bool, Option<RelayoutTicket>) {
        if self.is_visible(section) {
            self.hide(section);
            (false, None)
        } else {
            (true, self.show(section))
        }
    }

    /// Redeem a ticket: true if it is the newest for its section and the
    /// section is still visible. A redeemed ticket cannot be used again.
    pub fn redeem(&mut self, ticket: RelayoutTicket) -> bool {
        let idx = ticket.section.index();
        if self.generations[idx] != ticket.generation || !self.visible[idx] {
            return false;
        }
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        true
    }

    pub fn visible_sections(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.is_visible(*s))
    }
}
