//! User model for local storage and API.

use serde::{Deserialize, Serialize};

/// User snapshot returned at login/registration and cached in `user_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user ID
    pub id: u64,
    /// Email address (unique, validated server-side)
    pub email: String,
    /// Display name
    pub username: String,
    /// Current clean streak in days
    pub streak_count: u32,
    /// Best streak ever reached (>= streak_count by convention)
    pub best_streak: u32,
}

/// Response body of `/api/auth/login` and `/api/auth/register`.
///
/// The token travels alongside the user fields; anything else
/// (e.g. `token_type`) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub user: User,
}

impl AuthResponse {
    /// Split into the bearer token and the user snapshot.
    pub fn into_parts(self) -> (String, User) {
        (self.access_token, self.user)
    }
}

/// Request body for `/api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for `/api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Full profile from `/api/user/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub streak_count: u32,
    pub best_streak: u32,
    /// Money not spent on junk food
    #[serde(default)]
    pub total_saved: f64,
    #[serde(default)]
    pub avg_guilt_score: f64,
    #[serde(default)]
    pub total_logs: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `/api/streak/increment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub streak_count: u32,
    #[serde(default)]
    pub best_streak: Option<u32>,
    #[serde(default)]
    pub is_new_record: bool,
}
