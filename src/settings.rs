//! Page configuration
//!
//! Supplied by the host page as JSON in a `<script type="application/json"
//! id="superstars-config">` element. Missing fields take their defaults.
//! Nothing is written back; all animation state resets on reload.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SPEED, MIN_SPEED};

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speed multiplier on load (clamped to the valid range)
    pub initial_speed: f32,
    /// Start animating immediately
    pub autoplay: bool,
    /// Fixed RNG seed; random per load when absent
    pub seed: Option<u64>,

    // === Shop ===
    /// One bouncing item per image
    pub shop_image_urls: Vec<String>,
    /// Where shop items link to
    pub shop_link: String,

    // === About ===
    /// Used when the page has no about text of its own
    pub about_text: String,

    // === Stockists ===
    pub stockist_count: usize,

    // === Interviews ===
    pub interview_names: Vec<String>,

    /// Delay before a shown section is re-measured (ms)
    pub relayout_delay_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_speed: 1.0,
            autoplay: true,
            seed: None,

            shop_image_urls: (1..=4)
                .map(|i| format!("https://picsum.photos/200/310?random={i}"))
                .collect(),
            shop_link: "https://www.w3schools.com".to_string(),

            about_text: "Superstars is a small shop for big dreams".to_string(),

            stockist_count: 12,

            interview_names: (1..=15).map(|i| format!("Interviewee {i}")).collect(),

            relayout_delay_ms: 60,
        }
    }
}

impl Settings {
    /// Id of the config element in the host page
    pub const CONFIG_ELEMENT_ID: &'static str = "superstars-config";

    /// Parse settings from JSON, clamping the initial speed
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.initial_speed = if settings.initial_speed.is_finite() {
            settings.initial_speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
        settings.relayout_delay_ms = settings.relayout_delay_ms.max(0);
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on malformed JSON
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid page config ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from the page's config element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => {
                log::info!("Loaded page config");
                Self::from_json_or_default(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
