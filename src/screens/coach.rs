// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coach feedback card.
//!
//! Picks one of three fixed messages from the number of high-regret logs.

use serde::Serialize;

use super::Theme;
use crate::models::JunkLog;

pub const COACH_EMOJI: &str = "😟";
pub const COACH_TITLE: &str = "AI Coach says…";

/// Rendered coach card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachFeedback {
    pub emoji: &'static str,
    pub title: &'static str,
    pub text: String,
    pub high_regret_count: usize,
    pub text_color: String,
    pub background: String,
    pub shadow: Option<String>,
}

impl CoachFeedback {
    pub fn new(logs: &[JunkLog], theme: &Theme) -> Self {
        let high_regret_count = count_high_regret(logs);
        Self {
            emoji: COACH_EMOJI,
            title: COACH_TITLE,
            text: coach_message(high_regret_count),
            high_regret_count,
            text_color: theme.text.clone(),
            background: theme.card_bg.clone(),
            shadow: theme.card_shadow.clone(),
        }
    }
}

pub fn count_high_regret(logs: &[JunkLog]) -> usize {
    logs.iter().filter(|log| log.is_high_regret()).count()
}

pub fn coach_message(high_regret_count: usize) -> String {
    match high_regret_count {
        0 => "Great job! No high-regret logs today.".to_string(),
        1 => "You had 1 high-guilt log today. Want a reset plan?".to_string(),
        n => format!("You had {} high-guilt logs today. Want a reset plan?", n),
    }
}
