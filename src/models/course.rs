// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Course catalog and pre-registration models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A course offered for pre-registration (`/materias_disponibles`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct CatalogItem {
    /// Course code, unique within the catalog
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    /// Free-text schedule, e.g. "lunes 10:00"
    #[serde(default)]
    pub horario: String,
    #[serde(default)]
    pub aula: String,
    #[serde(default)]
    pub ubicacion: String,
}

/// A course the user has pre-selected (`/ver_preseleccion`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct SelectionItem {
    pub codigo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horario: Option<String>,
}

impl SelectionItem {
    pub fn new(codigo: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            nombre: None,
            horario: None,
        }
    }
}

/// A selection joined with its catalog entry, placed in a weekday bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct ScheduledCourse {
    pub codigo: String,
    pub nombre: String,
    /// Time part of `horario` once the weekday is removed ("10:00")
    pub hora: String,
    pub aula: String,
    pub ubicacion: String,
}
