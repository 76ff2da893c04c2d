// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analytics;
pub mod chat;
pub mod log;
pub mod user;

pub use analytics::{DailyBreakdown, DailyInsight, WeeklyAnalytics};
pub use chat::{ChatReply, ChatRequest};
pub use log::{JunkLog, NewJunkLog, HIGH_REGRET_THRESHOLD};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, StreakUpdate, User, UserProfile};
