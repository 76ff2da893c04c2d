// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models for the client screens.
//!
//! Each screen is plain data; drawing it is left to the renderer.

pub mod coach;
pub mod navigation;
pub mod progress;

use serde::{Deserialize, Serialize};

pub use coach::CoachFeedback;
pub use navigation::{NavButton, Navigation, NAV_ITEMS};
pub use progress::{DayScore, ProgressScreen};

/// Colors passed down to themed cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub text: String,
    pub card_bg: String,
    #[serde(default)]
    pub card_shadow: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: "#222222".to_string(),
            card_bg: "#ffffff".to_string(),
            card_shadow: Some("#000000".to_string()),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: "#f4f4f5".to_string(),
            card_bg: "#23263a".to_string(),
            card_shadow: Some("#000000".to_string()),
        }
    }
}
