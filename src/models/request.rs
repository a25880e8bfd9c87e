// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Administrative request ("solicitud") models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A request as tracked by the server. `estado` is server-owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct RequestRecord {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub tipo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub estado: String,
}

/// Request types the requests screen offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Beca,
    CartaEstudio,
    RecordNota,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [
        RequestKind::Beca,
        RequestKind::CartaEstudio,
        RequestKind::RecordNota,
    ];

    /// Wire code sent as `tipo`.
    pub fn code(self) -> &'static str {
        match self {
            RequestKind::Beca => "beca",
            RequestKind::CartaEstudio => "carta_estudio",
            RequestKind::RecordNota => "record_nota",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Beca => "Solicitud de beca",
            RequestKind::CartaEstudio => "Carta de estudios",
            RequestKind::RecordNota => "Record de nota",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Body of `/crear_solicitud`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRequest {
    pub tipo: String,
    pub descripcion: String,
}
