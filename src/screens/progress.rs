// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress screen: weekly shame score table and pattern analysis text.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::WeeklyAnalytics;

pub const PROGRESS_TITLE: &str = "Your Progress";
pub const WEEKLY_TITLE: &str = "Weekly Shame Score";
pub const ANALYSIS_TITLE: &str = "🤖 AI Pattern Analysis";

/// Canned analysis shown until the coach backend provides one.
pub const DEFAULT_ANALYSIS: &str = "Your data shows you're most vulnerable on Mondays and Fridays. \
Your average guilt score has dropped 40% this month - great progress!";

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One row of the weekly table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayScore {
    pub day: &'static str,
    /// Shame score (0.0-10.0)
    pub score: f64,
    /// Bar fill, `score * 10` clamped to 0..=100
    pub percentage: u8,
}

impl DayScore {
    fn new(day: &'static str, score: f64) -> Self {
        let percentage = (score * 10.0).round().clamp(0.0, 100.0) as u8;
        Self {
            day,
            score,
            percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressScreen {
    pub title: &'static str,
    pub weekly_title: &'static str,
    pub weekly: Vec<DayScore>,
    pub analysis_title: &'static str,
    pub analysis: String,
}

impl Default for ProgressScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressScreen {
    /// Static sample week.
    pub fn new() -> Self {
        let scores = [2.1, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0];
        Self::with_scores(scores, DEFAULT_ANALYSIS.to_string())
    }

    /// Build the table from weekly analytics, one row per weekday.
    ///
    /// A day's score is its average guilt rating; days without logs score 0.
    /// When two dates share a weekday the later one fills the row.
    /// Breakdown entries with unparseable dates are skipped.
    pub fn from_analytics(analytics: &WeeklyAnalytics, analysis: Option<String>) -> Self {
        let mut latest: [Option<(NaiveDate, f64)>; 7] = [None; 7];

        for day in &analytics.daily_breakdown {
            match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
                Ok(date) => {
                    let slot = &mut latest[weekday_slot(date.weekday())];
                    if slot.map_or(true, |(seen, _)| date > seen) {
                        *slot = Some((date, (day.avg_guilt * 10.0).round() / 10.0));
                    }
                }
                Err(e) => {
                    tracing::debug!(date = %day.date, error = %e, "Skipping breakdown with bad date");
                }
            }
        }

        let scores = latest.map(|entry| entry.map_or(0.0, |(_, score)| score));
        Self::with_scores(scores, analysis.unwrap_or_else(|| DEFAULT_ANALYSIS.to_string()))
    }

    fn with_scores(scores: [f64; 7], analysis: String) -> Self {
        Self {
            title: PROGRESS_TITLE,
            weekly_title: WEEKLY_TITLE,
            weekly: DAY_LABELS
                .into_iter()
                .zip(scores)
                .map(|(day, score)| DayScore::new(day, score))
                .collect(),
            analysis_title: ANALYSIS_TITLE,
            analysis,
        }
    }
}

fn weekday_slot(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}
