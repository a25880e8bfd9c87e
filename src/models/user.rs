// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! User, session and credential models.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Profile fields cached locally under the `userData` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct UserProfile {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
}

impl UserProfile {
    /// "Nombre Apellido", as the profile screen shows it.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

/// Authenticated identity: bearer token plus cached profile.
///
/// Token and profile are always persisted and cleared together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub auth_token: String,
    pub user: UserProfile,
}

/// Login credentials. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// `data` payload of a successful `/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Session {
            auth_token: data.auth_token,
            user: UserProfile {
                nombre: data.nombre,
                apellido: data.apellido,
                email: data.email,
            },
        }
    }
}

/// New account form sent to `/crear_usuario`.
#[derive(Clone, Serialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1))]
    pub nombre: String,
    #[validate(length(min = 1))]
    pub apellido: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("nombre", &self.nombre)
            .field("apellido", &self.apellido)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body of `/reset_password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordReset {
    pub usuario: String,
    pub email: String,
}

/// Body of `/cambiar_password`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}
