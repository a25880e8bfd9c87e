// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Course pre-registration workflow.
//!
//! Reconciles the server catalog (`/materias_disponibles`) with the user's
//! server-side selections (`/ver_preseleccion`):
//! 1. Refuse to submit a course that is already selected
//! 2. Submit the add/cancel mutation
//! 3. Re-fetch selections once the mutation is confirmed (no optimistic
//!    local insert or removal)

use crate::error::{AppError, Result};
use crate::models::{CatalogItem, SelectionItem, WeeklySchedule};
use crate::services::api::{endpoints, ApiClient, Auth};
use crate::services::schedule::build_weekly_schedule;
use serde_json::Value;

/// Mutation progress of a workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    /// Add/cancel request sent, response pending.
    Mutating,
    /// Mutation confirmed, authoritative state being re-fetched.
    Reconciling,
}

/// Pre-registration screen state.
///
/// Methods take `&mut self`, so a mutation and its reconciling re-fetch can
/// never interleave with another operation on the same instance.
pub struct PreselectionWorkflow {
    api: ApiClient,
    catalog: Option<Vec<CatalogItem>>,
    selections: Option<Vec<SelectionItem>>,
    phase: WorkflowPhase,
}

impl PreselectionWorkflow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            catalog: None,
            selections: None,
            phase: WorkflowPhase::Idle,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// Last loaded catalog, `None` until the first successful load.
    pub fn catalog(&self) -> Option<&[CatalogItem]> {
        self.catalog.as_deref()
    }

    /// Last loaded selections, `None` until the first successful load.
    pub fn selections(&self) -> Option<&[SelectionItem]> {
        self.selections.as_deref()
    }

    /// Advisory check against the last loaded selections.
    pub fn is_selected(&self, codigo: &str) -> bool {
        self.selections
            .as_ref()
            .is_some_and(|items| items.iter().any(|s| s.codigo == codigo))
    }

    /// Catalog entries not yet selected.
    pub fn available(&self) -> Vec<&CatalogItem> {
        self.catalog
            .iter()
            .flatten()
            .filter(|item| !self.is_selected(&item.codigo))
            .collect()
    }

    pub async fn load_catalog(&mut self) -> Result<&[CatalogItem]> {
        let catalog = fetch_catalog(&self.api).await?;
        Ok(self.catalog.insert(catalog).as_slice())
    }

    pub async fn load_selections(&mut self) -> Result<&[SelectionItem]> {
        let selections = fetch_selections(&self.api).await?;
        Ok(self.selections.insert(selections).as_slice())
    }

    /// Fetch catalog and selections concurrently. Both are replaced
    /// wholesale; if either fetch fails neither is updated.
    pub async fn load_all(&mut self) -> Result<()> {
        let (catalog, selections) =
            tokio::try_join!(fetch_catalog(&self.api), fetch_selections(&self.api))?;
        self.catalog = Some(catalog);
        self.selections = Some(selections);
        Ok(())
    }

    /// Pre-select a course, then reload selections from the server.
    pub async fn select(&mut self, codigo: &str) -> Result<&[SelectionItem]> {
        let codigo = codigo.trim();
        if codigo.is_empty() {
            return Err(AppError::Validation(
                "Seleccione una materia".to_string(),
            ));
        }

        // Never assume an empty selection set before it has been loaded.
        if self.selections.is_none() {
            self.load_selections().await?;
        }

        if self.is_selected(codigo) {
            return Err(AppError::AlreadySelected(codigo.to_string()));
        }

        self.mutate(
            endpoints::PRESELECT_COURSE,
            codigo,
            "No se pudo preseleccionar la materia",
        )
        .await?;

        tracing::info!(codigo, "Course pre-selected");
        self.reconcile().await
    }

    /// Cancel a pre-selection, then reload selections from the server.
    pub async fn cancel(&mut self, codigo: &str) -> Result<&[SelectionItem]> {
        let codigo = codigo.trim();
        if codigo.is_empty() {
            return Err(AppError::Validation(
                "Seleccione una materia".to_string(),
            ));
        }

        self.mutate(
            endpoints::CANCEL_PRESELECTION,
            codigo,
            "No se pudo cancelar la preselección",
        )
        .await?;

        tracing::info!(codigo, "Pre-selection cancelled");
        self.reconcile().await
    }

    /// Weekly schedule of the current selections, once both lists are loaded.
    pub fn schedule(&self) -> Option<WeeklySchedule> {
        match (&self.catalog, &self.selections) {
            (Some(catalog), Some(selections)) => Some(build_weekly_schedule(catalog, selections)),
            _ => None,
        }
    }

    async fn mutate(&mut self, path: &str, codigo: &str, fallback: &str) -> Result<()> {
        self.phase = WorkflowPhase::Mutating;
        // The body is the bare course code as a JSON string.
        let body = Value::String(codigo.to_string());
        let result = self
            .api
            .post_envelope(path, &body, Auth::Session, fallback)
            .await;
        if result.is_err() {
            self.phase = WorkflowPhase::Idle;
        }
        result.map(|_| ())
    }

    async fn reconcile(&mut self) -> Result<&[SelectionItem]> {
        self.phase = WorkflowPhase::Reconciling;
        let result = fetch_selections(&self.api).await;
        self.phase = WorkflowPhase::Idle;
        Ok(self.selections.insert(result?).as_slice())
    }
}

async fn fetch_catalog(api: &ApiClient) -> Result<Vec<CatalogItem>> {
    api.get_envelope(
        endpoints::AVAILABLE_COURSES,
        "No se pudieron cargar las materias disponibles",
    )
    .await
}

async fn fetch_selections(api: &ApiClient) -> Result<Vec<SelectionItem>> {
    api.get_envelope(
        endpoints::PRESELECTION,
        "No se pudo cargar la preselección",
    )
    .await
}
