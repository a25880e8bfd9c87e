// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Client error taxonomy with consistent user-facing messages.
//!
//! Every error ends up at a screen or workflow boundary where it is shown
//! as a single blocking notification. Nothing here is fatal to the process.

/// Application error type returned by every core operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No authentication token available")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Logout did not clear the stored session")]
    LogoutIncomplete,

    #[error("Course already selected: {0}")]
    AlreadySelected(String),

    #[error("Another request is already in flight")]
    Busy,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable snake_case code, used for logs and by UI layers that branch
    /// on the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Unauthenticated => "unauthenticated",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Rejected(_) => "rejected",
            AppError::Network(_) => "network_error",
            AppError::MalformedResponse(_) => "malformed_response",
            AppError::Http { .. } => "http_error",
            AppError::Storage(_) => "storage_error",
            AppError::LogoutIncomplete => "logout_incomplete",
            AppError::AlreadySelected(_) => "already_selected",
            AppError::Busy => "busy",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Text of the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthenticated => "No se encontró el token de autenticación".to_string(),
            AppError::InvalidCredentials => "Usuario o contraseña incorrectos".to_string(),
            AppError::Rejected(msg) => msg.clone(),
            AppError::Network(_) | AppError::Http { .. } => {
                "Ocurrió un problema al comunicarse con el servidor".to_string()
            }
            AppError::MalformedResponse(_) => {
                "Error al procesar la respuesta del servidor".to_string()
            }
            AppError::Storage(_) => "No se pudo guardar o leer la sesión".to_string(),
            AppError::LogoutIncomplete => "No se pudo cerrar sesión correctamente".to_string(),
            AppError::AlreadySelected(codigo) => {
                format!("La materia {} ya está preseleccionada", codigo)
            }
            AppError::Busy => "Espere a que termine la operación en curso".to_string(),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal client error");
                "Ocurrió un error inesperado".to_string()
            }
        }
    }

    /// Whether the UI should send the user back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, AppError::Unauthenticated)
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, AppError>;
