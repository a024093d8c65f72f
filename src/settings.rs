//! Session settings and preferences
//!
//! Toggled by commands during play and read by the presentation layer.
//! Only the best score is ever persisted; settings live for the session.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound muted
    pub muted: bool,
    /// CRT-style visual filter over the canvas
    pub visual_filter: bool,
    /// Particle effects (catch sparkles, hit debris, stage-up burst)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            visual_filter: false,
            particles: true,
        }
    }
}

impl Settings {
    /// Parse host-provided preferences, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Flip mute; returns the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Flip the visual filter; returns the new value
    pub fn toggle_visual_filter(&mut self) -> bool {
        self.visual_filter = !self.visual_filter;
        self.visual_filter
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if self.particles { MAX_PARTICLES } else { 0 }
    }
}
