// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Session persistence on top of a `SessionStore`.
//!
//! Handles:
//! - Writing `authToken` and `userData` as one logical unit (rollback on
//!   partial failure)
//! - Reading the session back, discarding half-written leftovers
//! - Clearing both keys on logout or on a rejected token
//! - Publishing the authentication state, so a token rejected by any
//!   workflow is seen by the session controller and its subscribers

use crate::error::{AppError, Result};
use crate::models::{Session, UserProfile};
use crate::services::auth::AuthState;
use crate::store::{keys, SessionStore};
use std::sync::Arc;
use tokio::sync::watch;

/// Explicit handle to the session storage, passed to every controller and
/// workflow instead of reading ambient global state.
///
/// Clones share the store and the state channel.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<AuthState>>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(AuthState::LoggedOut);
        Self {
            store,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> AuthState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Publish `next`, returning the previous state.
    pub(crate) fn publish(&self, next: AuthState) -> AuthState {
        let prev = self.state.send_replace(next);
        if prev != next {
            tracing::debug!(from = ?prev, to = ?next, "Auth state transition");
        }
        prev
    }

    /// Persist token and profile together.
    ///
    /// If the profile write fails after the token was written, the token is
    /// removed again so the store never holds a token without a profile.
    pub async fn persist(&self, session: &Session) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode userData: {}", e)))?;

        self.store
            .set(keys::AUTH_TOKEN, &session.auth_token)
            .await?;

        if let Err(e) = self.store.set(keys::USER_DATA, &user_json).await {
            tracing::warn!(error = %e, "Failed to write userData, rolling back authToken");
            if let Err(rollback) = self.store.remove(keys::AUTH_TOKEN).await {
                tracing::error!(error = %rollback, "Rollback of authToken failed");
            }
            return Err(e.into());
        }

        Ok(())
    }

    /// Bearer token for authenticated calls, if one is stored.
    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(keys::AUTH_TOKEN)
            .await?
            .filter(|t| !t.is_empty()))
    }

    /// Cached profile, if one is stored.
    pub async fn user(&self) -> Result<Option<UserProfile>> {
        match self.store.get(keys::USER_DATA).await? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| AppError::Storage(format!("userData is not valid JSON: {}", e))),
            None => Ok(None),
        }
    }

    /// Load the full session. A half-written session (only one of the two
    /// keys present) is cleared and reported as absent.
    pub async fn load(&self) -> Result<Option<Session>> {
        let token = self.token().await?;
        let user = match self.user().await {
            Ok(user) => user,
            Err(AppError::Storage(msg)) if token.is_some() => {
                tracing::warn!(error = %msg, "Discarding unreadable userData");
                None
            }
            Err(e) => return Err(e),
        };

        match (token, user) {
            (Some(auth_token), Some(user)) => Ok(Some(Session { auth_token, user })),
            (None, None) => Ok(None),
            _ => {
                tracing::warn!("Found half-written session, clearing it");
                // Best effort: a failure here leaves the same partial state.
                if let Err(e) = self.clear().await {
                    tracing::warn!(error = %e, "Could not clear half-written session");
                }
                Ok(None)
            }
        }
    }

    /// Remove both keys, token first.
    ///
    /// If the token cannot be removed, `userData` is left in place so the
    /// store still holds a complete session. Either failure is
    /// `LogoutIncomplete`.
    pub async fn clear(&self) -> Result<()> {
        if let Err(e) = self.store.remove(keys::AUTH_TOKEN).await {
            tracing::warn!(error = %e, key = keys::AUTH_TOKEN, "Failed to remove key");
            return Err(AppError::LogoutIncomplete);
        }

        if let Err(e) = self.store.remove(keys::USER_DATA).await {
            tracing::warn!(error = %e, key = keys::USER_DATA, "Failed to remove key");
            return Err(AppError::LogoutIncomplete);
        }

        Ok(())
    }

    /// Destroy a session whose token the server rejected, and publish
    /// `LoggedOut` once no token is left in the store.
    pub(crate) async fn invalidate(&self) {
        match self.clear().await {
            Ok(()) => {
                self.publish(AuthState::LoggedOut);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to clear rejected session");
                if let Ok(None) = self.token().await {
                    self.publish(AuthState::LoggedOut);
                }
            }
        }
    }
}
