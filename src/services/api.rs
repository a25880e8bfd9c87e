// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! UASD REST API client.
//!
//! Handles:
//! - Bearer token attachment from the session store
//! - Transport failure mapping (network, HTTP status, malformed JSON)
//! - Empty bodies, which are read as `{}`
//! - Response shape adapters: `{success, data, message}` envelopes and bare
//!   JSON arrays are both in use, so each endpoint picks its adapter

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::auth::AuthState;
use crate::services::session::SessionContext;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub use reqwest::Method;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/login";
    pub const CREATE_USER: &str = "/crear_usuario";
    pub const RESET_PASSWORD: &str = "/reset_password";
    pub const CHANGE_PASSWORD: &str = "/cambiar_password";

    pub const AVAILABLE_COURSES: &str = "/materias_disponibles";
    pub const PRESELECTION: &str = "/ver_preseleccion";
    pub const PRESELECT_COURSE: &str = "/preseleccionar_materia";
    pub const CANCEL_PRESELECTION: &str = "/cancelar_preseleccion_materia";

    pub const MY_REQUESTS: &str = "/mis_solicitudes";
    pub const CREATE_REQUEST: &str = "/crear_solicitud";
    pub const CANCEL_REQUEST: &str = "/cancelar_solicitud";

    pub const SCHEDULES: &str = "/horarios";
    pub const EVENTS: &str = "/eventos";
    pub const NEWS: &str = "/noticias";
    pub const VIDEOS: &str = "/videos";
    pub const DEBTS: &str = "/deudas";
    pub const TASKS: &str = "/tareas";
}

/// How a call is authenticated.
#[derive(Clone)]
pub enum Auth {
    /// No `Authorization` header.
    None,
    /// Token read from the session store; fails with `Unauthenticated`
    /// before any network I/O when no token is stored.
    Session,
    /// Explicit token (registration bootstrap token).
    Bearer(String),
}

/// UASD API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a new client for the configured host.
    pub fn new(config: &Config, session: SessionContext) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// Session handle shared with controllers and workflows.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Perform a request and return the parsed JSON body.
    ///
    /// This checks the transport layer only. Application-level success
    /// (`success: true`) is checked by the `Envelope` adapter.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        auth: Auth,
    ) -> Result<Value> {
        let token = match &auth {
            Auth::None => None,
            Auth::Session => match self.session.token().await? {
                Some(token) => Some(token),
                None => {
                    self.session.publish(AuthState::LoggedOut);
                    return Err(AppError::Unauthenticated);
                }
            },
            Auth::Bearer(token) => Some(token.clone()),
        };

        tracing::debug!(
            method = %method,
            path,
            authenticated = token.is_some(),
            "API request"
        );

        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, &url);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let text = response.text().await.map_err(network_error)?;

        let parsed: std::result::Result<Value, serde_json::Error> = if text.trim().is_empty() {
            Ok(Value::Object(Default::default()))
        } else {
            serde_json::from_str(&text)
        };

        if !status.is_success() {
            return Err(self.status_error(status, text, parsed.ok(), &auth).await);
        }

        parsed.map_err(|e| AppError::MalformedResponse(format!("JSON parse error: {}", e)))
    }

    /// GET an envelope endpoint and decode its `data` (missing data → default).
    pub async fn get_envelope<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T> {
        let value = self.request(Method::GET, path, None, Auth::Session).await?;
        Envelope::from_value(value)?.data_or_default(fallback)
    }

    /// GET an endpoint that answers with a bare JSON array.
    pub async fn get_bare<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value = self.request(Method::GET, path, None, Auth::Session).await?;
        bare_list(value)
    }

    /// POST to an envelope endpoint and require `success: true`.
    pub async fn post_envelope(
        &self,
        path: &str,
        body: &Value,
        auth: Auth,
        fallback: &str,
    ) -> Result<Option<Value>> {
        let value = self.request(Method::POST, path, Some(body), auth).await?;
        Envelope::from_value(value)?.into_success(fallback)
    }

    /// Map a non-2xx response to an error.
    async fn status_error(
        &self,
        status: StatusCode,
        text: String,
        parsed: Option<Value>,
        auth: &Auth,
    ) -> AppError {
        if status == StatusCode::UNAUTHORIZED && matches!(auth, Auth::Session) {
            tracing::warn!("Stored token rejected by server, clearing session");
            self.session.invalidate().await;
            return AppError::Unauthenticated;
        }

        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty());

        match message {
            Some(message) => AppError::Rejected(message.to_string()),
            None => AppError::Http {
                status: status.as_u16(),
                body: text,
            },
        }
    }
}

fn network_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Network("request timed out".to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

/// `{success, data?, message?}` response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Interpret a JSON body as an envelope. Non-objects are malformed.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AppError::MalformedResponse(
                "expected a {success, data, message} object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| AppError::MalformedResponse(format!("Invalid envelope: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// Require `success: true`, returning `data`. Anything else is a
    /// rejection carrying the server message or `fallback`.
    pub fn into_success(self, fallback: &str) -> Result<Option<Value>> {
        if self.is_success() {
            return Ok(self.data);
        }

        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(message = %message, "Request rejected by server");
        Err(AppError::Rejected(message))
    }

    /// Require success and decode `data` as `T`.
    pub fn data_as<T: DeserializeOwned>(self, fallback: &str) -> Result<T> {
        let data = self
            .into_success(fallback)?
            .ok_or_else(|| AppError::MalformedResponse("missing data field".to_string()))?;
        decode(data)
    }

    /// Require success and decode `data`, treating a missing or null
    /// `data` as `T::default()`.
    pub fn data_or_default<T: DeserializeOwned + Default>(self, fallback: &str) -> Result<T> {
        match self.into_success(fallback)? {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => decode(data),
        }
    }
}

/// Decode a bare JSON array body.
pub fn bare_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    if !value.is_array() {
        return Err(AppError::MalformedResponse(
            "expected a JSON array".to_string(),
        ));
    }
    decode(value)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::MalformedResponse(format!("Unexpected data shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_returns_data() {
        let env = Envelope::from_value(json!({"success": true, "data": [1, 2]})).unwrap();
        let data: Vec<u32> = env.data_as("x").unwrap();
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn test_envelope_failure_uses_server_message() {
        let env = Envelope::from_value(json!({"success": false, "message": "Cupo lleno"})).unwrap();
        let err = env.into_success("fallback").unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == "Cupo lleno"));
    }

    #[test]
    fn test_empty_object_is_rejection_with_fallback() {
        let env = Envelope::from_value(json!({})).unwrap();
        let err = env.into_success("No se pudo completar").unwrap_err();
        assert!(matches!(err, AppError::Rejected(ref m) if m == "No se pudo completar"));
    }

    #[test]
    fn test_envelope_rejects_bare_array() {
        let err = Envelope::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_bare_list_rejects_object() {
        let err = bare_list::<u32>(json!({"success": true})).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert_eq!(bare_list::<u32>(json!([3])).unwrap(), vec![3]);
    }

    #[test]
    fn test_data_or_default_on_null() {
        let env = Envelope::from_value(json!({"success": true, "data": null})).unwrap();
        let data: Vec<u32> = env.data_or_default("x").unwrap();
        assert!(data.is_empty());
    }
}
