// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Junk food log entries.
//!
//! Older clients and payloads spell the regret field `regretRating`; the
//! current API uses `regret_rating`. Both are folded into a single
//! `regret_rating` here so nothing downstream has to care.

use serde::{Deserialize, Serialize};

/// Regret rating at or above which a log counts as "high regret".
pub const HIGH_REGRET_THRESHOLD: u8 = 4;

/// A logged junk food event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawJunkLog")]
pub struct JunkLog {
    pub id: u64,
    pub photo_url: Option<String>,
    pub food_type: String,
    /// Guilt rating (1-5)
    pub guilt_rating: u8,
    /// Regret rating (1-5), 0 when the payload carried none
    pub regret_rating: u8,
    pub estimated_cost: f64,
    pub estimated_calories: u32,
    pub location: Option<String>,
    /// Creation time (ISO 8601)
    pub created_at: String,
    /// Coach message generated when the log was created
    pub ai_motivation: Option<String>,
}

impl JunkLog {
    /// Minimal log carrying only a regret rating.
    pub fn with_regret(regret_rating: u8) -> Self {
        Self {
            id: 0,
            photo_url: None,
            food_type: String::new(),
            guilt_rating: 0,
            regret_rating,
            estimated_cost: 0.0,
            estimated_calories: 0,
            location: None,
            created_at: String::new(),
            ai_motivation: None,
        }
    }

    pub fn is_high_regret(&self) -> bool {
        self.regret_rating >= HIGH_REGRET_THRESHOLD
    }
}

/// Wire shape accepting both regret spellings. Nullable columns come
/// through as `null`, so they are all `Option` here.
#[derive(Deserialize)]
struct RawJunkLog {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    food_type: Option<String>,
    #[serde(default)]
    guilt_rating: Option<u8>,
    #[serde(default)]
    regret_rating: Option<u8>,
    #[serde(default, rename = "regretRating")]
    regret_rating_camel: Option<u8>,
    #[serde(default)]
    estimated_cost: Option<f64>,
    #[serde(default)]
    estimated_calories: Option<u32>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    ai_motivation: Option<String>,
}

impl From<RawJunkLog> for JunkLog {
    fn from(raw: RawJunkLog) -> Self {
        // A zero camelCase rating is treated as missing, same as the snake one.
        let regret_rating = raw
            .regret_rating_camel
            .filter(|r| *r != 0)
            .or(raw.regret_rating)
            .unwrap_or(0);

        Self {
            id: raw.id,
            photo_url: raw.photo_url,
            food_type: raw.food_type.unwrap_or_default(),
            guilt_rating: raw.guilt_rating.unwrap_or(0),
            regret_rating,
            estimated_cost: raw.estimated_cost.unwrap_or(0.0),
            estimated_calories: raw.estimated_calories.unwrap_or(0),
            location: raw.location,
            created_at: raw.created_at.unwrap_or_default(),
            ai_motivation: raw.ai_motivation,
        }
    }
}

/// Input for creating a log via multipart upload.
#[derive(Debug, Clone)]
pub struct NewJunkLog {
    /// Photo bytes
    pub photo: Vec<u8>,
    /// File name sent with the photo part
    pub photo_name: String,
    pub food_type: String,
    pub guilt_rating: u8,
    pub regret_rating: u8,
    pub estimated_cost: Option<f64>,
    pub location: Option<String>,
}

impl NewJunkLog {
    /// Build the multipart form expected by `POST /api/logs`.
    pub fn into_form(self) -> reqwest::multipart::Form {
        let photo = reqwest::multipart::Part::bytes(self.photo).file_name(self.photo_name);

        let mut form = reqwest::multipart::Form::new()
            .part("photo", photo)
            .text("food_type", self.food_type)
            .text("guilt_rating", self.guilt_rating.to_string())
            .text("regret_rating", self.regret_rating.to_string());

        if let Some(cost) = self.estimated_cost.filter(|c| *c != 0.0) {
            form = form.text("estimated_cost", cost.to_string());
        }
        if let Some(location) = self.location.filter(|l| !l.is_empty()) {
            form = form.text("location", location);
        }
        form
    }
}
