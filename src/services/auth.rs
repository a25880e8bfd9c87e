// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Session lifecycle: login, registration, password reset/change, logout.
//!
//! State machine:
//! `LoggedOut -> Authenticating -> LoggedIn -> LoggingOut -> LoggedOut`.
//! A failed step returns to the state it started from.

use crate::error::{AppError, Result};
use crate::models::{
    Credentials, LoginData, PasswordChange, PasswordReset, Registration, Session, UserProfile,
};
use crate::services::api::{endpoints, ApiClient, Auth, Envelope, Method};
use crate::services::session::SessionContext;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use validator::Validate;

const MSG_REQUIRED_FIELDS: &str = "Por favor, complete todos los campos";
const MSG_INVALID_EMAIL: &str = "El correo electrónico no es válido";
const MSG_PASSWORD_MISMATCH: &str = "Las nuevas contraseñas no coinciden";

/// Where the UI should go once an operation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Main drawer navigation (logged in).
    Home,
    /// Login screen.
    Login,
    /// Previous screen.
    Back,
}

/// Authentication state observed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    Authenticating,
    LoggedIn,
    LoggingOut,
}

/// Single in-flight request guard. Released on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Orchestrates the session store and API client for account operations.
///
/// The auth state lives in the shared `SessionContext`, so a token rejected
/// during any workflow call also moves the controller to `LoggedOut`.
pub struct SessionController {
    api: ApiClient,
    in_flight: AtomicBool,
    bootstrap_token: Option<String>,
}

impl SessionController {
    pub fn new(api: ApiClient, bootstrap_token: Option<String>) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
            bootstrap_token,
        }
    }

    pub fn state(&self) -> AuthState {
        self.session().state()
    }

    /// Receive every state transition (for re-rendering).
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.session().subscribe()
    }

    /// Whether a guarded operation is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn session(&self) -> &SessionContext {
        self.api.session()
    }

    fn transition(&self, next: AuthState) {
        self.session().publish(next);
    }

    /// Restore a persisted session at startup.
    pub async fn restore(&self) -> Result<Navigation> {
        match self.session().load().await? {
            Some(session) => {
                tracing::info!(email = %session.user.email, "Session restored");
                self.transition(AuthState::LoggedIn);
                Ok(Navigation::Home)
            }
            None => {
                self.transition(AuthState::LoggedOut);
                Ok(Navigation::Login)
            }
        }
    }

    /// Log in and persist the returned session.
    ///
    /// On any failure the session store is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(AppError::Validation(MSG_REQUIRED_FIELDS.to_string()));
        }

        let _guard = InFlight::acquire(&self.in_flight)?;
        let prev = self.state();
        self.transition(AuthState::Authenticating);

        match self.authenticate(credentials).await {
            Ok(session) => {
                self.transition(AuthState::LoggedIn);
                tracing::info!(username = %credentials.username, "Login successful");
                Ok(session)
            }
            Err(e) => {
                self.transition(prev);
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                Err(e)
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let body = serde_json::to_value(credentials)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode login: {}", e)))?;

        let value = match self
            .api
            .request(Method::POST, endpoints::LOGIN, Some(&body), Auth::None)
            .await
        {
            Ok(value) => value,
            Err(AppError::Rejected(_)) => return Err(AppError::InvalidCredentials),
            Err(AppError::Http { status: 401, .. }) => return Err(AppError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        let envelope = Envelope::from_value(value)?;
        if !envelope.is_success() {
            return Err(AppError::InvalidCredentials);
        }

        let data: LoginData = envelope.data_as("Usuario o contraseña incorrectos")?;
        if data.auth_token.is_empty() {
            return Err(AppError::MalformedResponse(
                "login response without authToken".to_string(),
            ));
        }

        let session = Session::from(data);
        self.session().persist(&session).await?;
        Ok(session)
    }

    /// Create an account. Does not log in: the user is sent to the login
    /// screen afterwards.
    pub async fn register(&self, registration: &Registration) -> Result<Navigation> {
        let required = [
            &registration.nombre,
            &registration.apellido,
            &registration.username,
            &registration.email,
            &registration.password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::Validation(MSG_REQUIRED_FIELDS.to_string()));
        }
        if registration.validate().is_err() {
            return Err(AppError::Validation(MSG_INVALID_EMAIL.to_string()));
        }

        let _guard = InFlight::acquire(&self.in_flight)?;

        let auth = match &self.bootstrap_token {
            Some(token) => {
                tracing::warn!("Registering with the configured bootstrap token");
                Auth::Bearer(token.clone())
            }
            None => Auth::None,
        };

        let body = serde_json::to_value(registration).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to encode registration: {}", e))
        })?;

        self.api
            .post_envelope(
                endpoints::CREATE_USER,
                &body,
                auth,
                "No se pudo crear el usuario",
            )
            .await?;

        tracing::info!(username = %registration.username, "Account created");
        Ok(Navigation::Login)
    }

    /// Ask the server to email a password reset link.
    pub async fn reset_password(&self, usuario: &str, email: &str) -> Result<Navigation> {
        if usuario.trim().is_empty() || email.trim().is_empty() {
            return Err(AppError::Validation(MSG_REQUIRED_FIELDS.to_string()));
        }

        let _guard = InFlight::acquire(&self.in_flight)?;

        let body = serde_json::to_value(PasswordReset {
            usuario: usuario.to_string(),
            email: email.to_string(),
        })
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode reset: {}", e)))?;

        self.api
            .post_envelope(
                endpoints::RESET_PASSWORD,
                &body,
                Auth::None,
                "Ocurrió un problema.",
            )
            .await?;

        tracing::info!(usuario, "Password reset requested");
        Ok(Navigation::Login)
    }

    /// Change the password of the logged-in user.
    ///
    /// `new_password` and `confirm_password` must match before any call
    /// is made.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Navigation> {
        if old_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            return Err(AppError::Validation(MSG_REQUIRED_FIELDS.to_string()));
        }
        if new_password != confirm_password {
            return Err(AppError::Validation(MSG_PASSWORD_MISMATCH.to_string()));
        }

        let _guard = InFlight::acquire(&self.in_flight)?;

        let body = serde_json::to_value(PasswordChange {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        })
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode change: {}", e)))?;

        self.api
            .post_envelope(
                endpoints::CHANGE_PASSWORD,
                &body,
                Auth::Session,
                "No se pudo cambiar la contraseña",
            )
            .await?;

        tracing::info!("Password changed");
        Ok(Navigation::Back)
    }

    /// Profile of the logged-in user, as cached at login.
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.session()
            .user()
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    /// Clear the stored session.
    ///
    /// Only moves to `LoggedOut` if both keys were removed; otherwise the
    /// previous state is kept and `LogoutIncomplete` is returned.
    pub async fn logout(&self) -> Result<Navigation> {
        let prev = self.state();
        self.transition(AuthState::LoggingOut);

        match self.session().clear().await {
            Ok(()) => {
                self.transition(AuthState::LoggedOut);
                tracing::info!("Logged out");
                Ok(Navigation::Login)
            }
            Err(e) => {
                self.transition(prev);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);
        {
            let _first = InFlight::acquire(&flag).unwrap();
            assert!(matches!(InFlight::acquire(&flag), Err(AppError::Busy)));
        }
        assert!(InFlight::acquire(&flag).is_ok());
    }
}
