//! Carousel configuration.
//!
//! All settings are fixed at construction time; a mounted carousel never
//! re-reads its config.

use serde::Deserialize;

use crate::error::Result;

/// Visual transition style for slide changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Opacity cross-dissolve between slides.
    #[default]
    Fade,
    /// Horizontal translation of the slide track.
    Slide,
}

impl Mode {
    /// Parse a mode string. Returns `None` for unrecognized values so
    /// string-driven construction can skip the element instead of failing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fade" => Some(Mode::Fade),
            "slide" => Some(Mode::Slide),
            _ => None,
        }
    }
}

/// Timer-driven automatic advance.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Whether autoplay is on. Only honored when looping is also on.
    pub enabled: bool,
    /// Interval between automatic advances, in milliseconds.
    pub interval_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 5000,
        }
    }
}

/// Per-instance carousel settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Selector for the slider root elements.
    pub slider: String,
    /// Transition style.
    pub mode: Mode,
    /// Duration of one slide change, in milliseconds.
    pub transition_duration_ms: u64,
    /// Wrap around at the ends (infinite loop).
    pub loop_around: bool,
    /// Automatic advance settings.
    pub autoplay: AutoplayConfig,
    /// Create prev/next buttons.
    pub manual_controls: bool,
    /// Cadence of the manually-stepped animation path, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slider: ".carousel".to_string(),
            mode: Mode::Fade,
            transition_duration_ms: 500,
            loop_around: true,
            autoplay: AutoplayConfig::default(),
            manual_controls: true,
            tick_interval_ms: 10,
        }
    }
}

impl CarouselConfig {
    /// Load a config from a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
