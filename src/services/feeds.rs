// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

//! Read-only feed screens (news, events, videos, tasks, debts, schedules).
//!
//! Every feed is fetched in full each time its screen gains focus. The
//! response shape is declared per feed: some endpoints wrap their list in
//! the `{success, data}` envelope, others answer with a bare array.

use crate::error::{AppError, Result};
use crate::models::{CatalogItem, DebtItem, EventItem, NewsItem, TaskItem, VideoItem};
use crate::services::api::{endpoints, ApiClient};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Response shape of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{success, data: [...], message?}`
    Envelope,
    /// `[...]`
    Bare,
}

/// A read-only list endpoint.
pub trait Feed: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + Send + Sync;
    const PATH: &'static str;
    const SHAPE: ResponseShape;
    /// Alert text when the server rejects the fetch without a message.
    const ERROR_MESSAGE: &'static str;
}

pub struct News;
pub struct Events;
pub struct Videos;
pub struct Tasks;
pub struct Debts;
pub struct Schedules;

impl Feed for News {
    type Item = NewsItem;
    const PATH: &'static str = endpoints::NEWS;
    const SHAPE: ResponseShape = ResponseShape::Envelope;
    const ERROR_MESSAGE: &'static str = "No se pudieron cargar las noticias";
}

impl Feed for Events {
    type Item = EventItem;
    const PATH: &'static str = endpoints::EVENTS;
    const SHAPE: ResponseShape = ResponseShape::Bare;
    const ERROR_MESSAGE: &'static str = "Ocurrió un problema al cargar los eventos";
}

impl Feed for Videos {
    type Item = VideoItem;
    const PATH: &'static str = endpoints::VIDEOS;
    const SHAPE: ResponseShape = ResponseShape::Bare;
    const ERROR_MESSAGE: &'static str = "No se pudieron cargar los videos";
}

impl Feed for Tasks {
    type Item = TaskItem;
    const PATH: &'static str = endpoints::TASKS;
    const SHAPE: ResponseShape = ResponseShape::Bare;
    const ERROR_MESSAGE: &'static str = "No se pudo cargar las tareas";
}

impl Feed for Debts {
    type Item = DebtItem;
    const PATH: &'static str = endpoints::DEBTS;
    const SHAPE: ResponseShape = ResponseShape::Envelope;
    const ERROR_MESSAGE: &'static str = "No se pudo cargar la deuda";
}

impl Feed for Schedules {
    type Item = CatalogItem;
    const PATH: &'static str = endpoints::SCHEDULES;
    const SHAPE: ResponseShape = ResponseShape::Envelope;
    const ERROR_MESSAGE: &'static str = "No se pudieron cargar los horarios";
}

/// Fetch a feed once, applying its declared response shape.
pub async fn fetch_feed<F: Feed>(api: &ApiClient) -> Result<Vec<F::Item>> {
    match F::SHAPE {
        ResponseShape::Envelope => api.get_envelope(F::PATH, F::ERROR_MESSAGE).await,
        ResponseShape::Bare => api.get_bare(F::PATH).await,
    }
}

/// Why a feed failed to load, kept for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&AppError> for FeedFailure {
    fn from(err: &AppError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

/// What a feed screen renders. `Loaded(vec![])` (empty-state message) and
/// `Failed` (alert) are distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(FeedFailure),
}

impl<T> FeedState<T> {
    pub fn is_empty_list(&self) -> bool {
        matches!(self, FeedState::Loaded(items) if items.is_empty())
    }
}

/// Fetch-on-focus list screen.
///
/// Each focus starts a new load generation; `unfocus` bumps the generation
/// so a response arriving after the screen lost focus is not committed.
pub struct FeedScreen<F: Feed> {
    api: ApiClient,
    state: Arc<RwLock<FeedState<F::Item>>>,
    generation: Arc<AtomicU64>,
    _feed: PhantomData<F>,
}

impl<F: Feed> Clone for FeedScreen<F> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            _feed: PhantomData,
        }
    }
}

impl<F: Feed> FeedScreen<F> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FeedState::Loading)),
            generation: Arc::new(AtomicU64::new(0)),
            _feed: PhantomData,
        }
    }

    /// Current render state.
    pub async fn state(&self) -> FeedState<F::Item> {
        self.state.read().await.clone()
    }

    /// Load the full list. The result is always returned to the caller but
    /// only committed to the screen state if no newer focus/unfocus
    /// happened meanwhile.
    pub async fn load_on_focus(&self) -> Result<Vec<F::Item>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().await = FeedState::Loading;

        let result = fetch_feed::<F>(&self.api).await;

        // Compared under the write lock so an unfocus racing the commit wins.
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(path = F::PATH, "Discarding stale feed response");
            return result;
        }

        *state = match &result {
            Ok(items) => FeedState::Loaded(items.clone()),
            Err(e) => {
                tracing::warn!(path = F::PATH, error = %e, "Feed load failed");
                FeedState::Failed(FeedFailure::from(e))
            }
        };
        drop(state);
        result
    }

    /// Screen lost focus: ignore any in-flight load.
    pub fn unfocus(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Session, UserProfile};
    use crate::services::session::SessionContext;
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in_api(server: &MockServer) -> ApiClient {
        let session = SessionContext::new(Arc::new(MemoryStore::new()));
        session
            .persist(&Session {
                auth_token: "abc123".to_string(),
                user: UserProfile {
                    nombre: "Juan".to_string(),
                    apellido: "Doe".to_string(),
                    email: "j@x.com".to_string(),
                },
            })
            .await
            .unwrap();
        ApiClient::new(&Config::for_base_url(&server.uri()).unwrap(), session).unwrap()
    }

    #[tokio::test]
    async fn test_unfocus_while_commit_waits_for_lock() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tareas"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;

        let screen = FeedScreen::<Tasks>::new(logged_in_api(&server).await);
        let background = screen.clone();
        let load = tokio::spawn(async move { background.load_on_focus().await });

        // Let the load start its fetch, then hold the state lock until the
        // response is in and the commit is blocked on it.
        tokio::time::sleep(Duration::from_millis(30)).await;
        let reader = screen.state.read().await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        screen.unfocus();
        drop(reader);

        assert!(load.await.unwrap().is_ok());
        assert_eq!(screen.state().await, FeedState::Loading);
    }
}
