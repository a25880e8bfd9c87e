// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! UASD client core: session handling and request orchestration for the
//! student services app.
//!
//! UI layers (mobile screens, the `uasd` CLI) call into this crate; it owns
//! the stored session, talks to the REST API and keeps the pre-registration
//! and request workflows consistent with the server.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use error::Result;
use services::feeds::{Feed, FeedScreen};
use services::{ApiClient, PreselectionWorkflow, RequestWorkflow, SessionContext, SessionController};
use std::sync::Arc;
use store::SessionStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub auth: SessionController,
}

impl AppState {
    /// Wire the API client and session controller around `store`.
    pub fn new(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = SessionContext::new(store);
        let api = ApiClient::new(&config, session)?;
        let auth = SessionController::new(api.clone(), config.bootstrap_token.clone());
        Ok(Self { config, api, auth })
    }

    pub fn preselection(&self) -> PreselectionWorkflow {
        PreselectionWorkflow::new(self.api.clone())
    }

    pub fn requests(&self) -> RequestWorkflow {
        RequestWorkflow::new(self.api.clone())
    }

    pub fn feed<F: Feed>(&self) -> FeedScreen<F> {
        FeedScreen::new(self.api.clone())
    }
}
