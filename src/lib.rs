// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! JunkStop client core.
//!
//! Session lifecycle, the HTTP gateway to the JunkStop REST API, local
//! credential storage, and the view models behind the app screens.

pub mod config;
pub mod error;
pub mod models;
pub mod screens;
pub mod services;
pub mod storage;

use std::sync::Arc;

use config::Config;
use services::{Gateway, JunkStopApi, SessionManager};
use storage::CredentialStore;

/// Wired-up client: one gateway shared by the session manager and API.
pub struct Client {
    pub config: Config,
    pub session: SessionManager,
    pub api: JunkStopApi,
}

impl Client {
    /// Build the client and restore any stored session.
    pub async fn connect(
        config: Config,
        store: Arc<dyn CredentialStore>,
    ) -> error::Result<Self> {
        let gateway = Gateway::new(&config, store)?;
        let api = JunkStopApi::new(gateway.clone());
        let session = SessionManager::start(gateway).await;

        Ok(Self {
            config,
            session,
            api,
        })
    }
}
