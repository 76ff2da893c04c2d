//! Progress analytics returned by the API.

use serde::{Deserialize, Serialize};

/// Last seven days of logging, from `/api/analytics/weekly`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyAnalytics {
    #[serde(default)]
    pub total_logs: u32,
    #[serde(default)]
    pub avg_guilt_score: f64,
    #[serde(default)]
    pub avg_regret_score: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_calories: u32,
    /// One entry per day that had logs, sorted by date
    #[serde(default)]
    pub daily_breakdown: Vec<DailyBreakdown>,
}

/// Aggregates for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// Date ("YYYY-MM-DD")
    pub date: String,
    pub count: u32,
    pub avg_guilt: f64,
    pub avg_regret: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_calories: u32,
}

/// Coach insight from `/api/ai/daily-insight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyInsight {
    pub insight: String,
    pub generated_at: String,
}
