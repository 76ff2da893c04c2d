// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and session lifecycle.

pub mod api;
pub mod gateway;
pub mod session;

pub use api::JunkStopApi;
pub use gateway::{Gateway, HeaderPolicy, RequestOptions};
pub use session::{AuthResult, Session, SessionManager, SessionState};
