// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Administrative request ("solicitud") workflow.
//!
//! Same reconcile-after-mutation shape as pre-registration: create and
//! cancel never touch the local list, which is replaced by a fresh
//! `/mis_solicitudes` fetch once the server confirms.

use crate::error::{AppError, Result};
use crate::models::{NewRequest, RequestKind, RequestRecord};
use crate::services::api::{endpoints, ApiClient, Auth};
use crate::services::selection::WorkflowPhase;

pub struct RequestWorkflow {
    api: ApiClient,
    records: Option<Vec<RequestRecord>>,
    phase: WorkflowPhase,
}

impl RequestWorkflow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            records: None,
            phase: WorkflowPhase::Idle,
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn records(&self) -> Option<&[RequestRecord]> {
        self.records.as_deref()
    }

    /// Request types offered on the requests screen.
    pub fn kinds(&self) -> &'static [RequestKind] {
        &RequestKind::ALL
    }

    pub async fn load(&mut self) -> Result<&[RequestRecord]> {
        let records = fetch_records(&self.api).await?;
        Ok(self.records.insert(records).as_slice())
    }

    /// Submit a new request, then reload the list.
    pub async fn create(
        &mut self,
        kind: RequestKind,
        descripcion: &str,
    ) -> Result<&[RequestRecord]> {
        let descripcion = descripcion.trim();
        if descripcion.is_empty() {
            return Err(AppError::Validation(
                "Describe tu solicitud".to_string(),
            ));
        }

        let body = serde_json::to_value(NewRequest {
            tipo: kind.code().to_string(),
            descripcion: descripcion.to_string(),
        })
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode request: {}", e)))?;

        self.mutate(endpoints::CREATE_REQUEST, &body, "No se pudo crear la solicitud")
            .await?;

        tracing::info!(tipo = kind.code(), "Request created");
        self.reconcile().await
    }

    /// Cancel a request by id, then reload the list.
    pub async fn cancel(&mut self, id: u64) -> Result<&[RequestRecord]> {
        // The body is the bare numeric id.
        let body = serde_json::Value::from(id);

        self.mutate(endpoints::CANCEL_REQUEST, &body, "No se pudo cancelar la solicitud")
            .await?;

        tracing::info!(id, "Request cancelled");
        self.reconcile().await
    }

    async fn mutate(&mut self, path: &str, body: &serde_json::Value, fallback: &str) -> Result<()> {
        self.phase = WorkflowPhase::Mutating;
        let result = self
            .api
            .post_envelope(path, body, Auth::Session, fallback)
            .await;
        if result.is_err() {
            self.phase = WorkflowPhase::Idle;
        }
        result.map(|_| ())
    }

    async fn reconcile(&mut self) -> Result<&[RequestRecord]> {
        self.phase = WorkflowPhase::Reconciling;
        let result = fetch_records(&self.api).await;
        self.phase = WorkflowPhase::Idle;
        Ok(self.records.insert(result?).as_slice())
    }
}

async fn fetch_records(api: &ApiClient) -> Result<Vec<RequestRecord>> {
    api.get_envelope(endpoints::MY_REQUESTS, "Error al obtener mis solicitudes")
        .await
}
