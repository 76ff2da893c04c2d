// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed wrappers for the authenticated JunkStop endpoints.

use crate::error::Result;
use crate::models::{
    ChatReply, ChatRequest, DailyInsight, JunkLog, NewJunkLog, StreakUpdate, UserProfile,
    WeeklyAnalytics,
};
use crate::services::gateway::{Gateway, RequestOptions};

/// Default page size for log listings.
pub const DEFAULT_LOG_LIMIT: u32 = 20;

/// JunkStop API client. All calls go through the shared [`Gateway`], so a
/// 401 from any of them ends the session.
#[derive(Clone)]
pub struct JunkStopApi {
    gateway: Gateway,
}

impl JunkStopApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Profile with lifetime totals.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.gateway.get_json("/api/user/profile").await
    }

    /// Most recent logs first.
    pub async fn list_logs(&self, limit: u32, offset: u32) -> Result<Vec<JunkLog>> {
        let path = format!("/api/logs?limit={}&offset={}", limit, offset);
        self.gateway.get_json(&path).await
    }

    /// Record a junk food event with its photo. The server resets the streak.
    pub async fn create_log(&self, log: NewJunkLog) -> Result<JunkLog> {
        tracing::info!(food_type = %log.food_type, regret = log.regret_rating, "Uploading log");
        self.gateway.upload("/api/logs", log.into_form()).await
    }

    pub async fn weekly_analytics(&self) -> Result<WeeklyAnalytics> {
        self.gateway.get_json("/api/analytics/weekly").await
    }

    /// Add one clean day to the streak.
    pub async fn increment_streak(&self) -> Result<StreakUpdate> {
        self.gateway
            .request("/api/streak/increment", RequestOptions::post())
            .await
    }

    pub async fn daily_insight(&self) -> Result<DailyInsight> {
        self.gateway.get_json("/api/ai/daily-insight").await
    }

    /// Ask the coach for a reply to a free-form message.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.gateway.post_json("/api/ai/chat", request).await
    }
}
