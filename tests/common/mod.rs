// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

use serde_json::{json, Value};
use std::sync::Arc;
use uasd_client::config::Config;
use uasd_client::models::{Session, UserProfile};
use uasd_client::services::SessionContext;
use uasd_client::store::MemoryStore;
use uasd_client::AppState;
use wiremock::{MockServer, ResponseTemplate};

pub const TOKEN: &str = "abc123";

/// Sample logged-in profile.
#[allow(dead_code)]
pub fn sample_user() -> UserProfile {
    UserProfile {
        nombre: "Juan".to_string(),
        apellido: "Doe".to_string(),
        email: "j@x.com".to_string(),
    }
}

/// Create a test app against `server` with an empty in-memory store.
/// Returns the app and a handle on the store for inspection.
#[allow(dead_code)]
pub fn create_test_app(server: &MockServer) -> (AppState, MemoryStore) {
    create_test_app_with_config(config_for(server))
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (AppState, MemoryStore) {
    let store = MemoryStore::new();
    let app = AppState::new(config, Arc::new(store.clone())).expect("Failed to build app");
    (app, store)
}

#[allow(dead_code)]
pub fn config_for(server: &MockServer) -> Config {
    Config::for_base_url(&server.uri()).expect("Mock server URI should be valid")
}

/// Create a test app whose store already holds a session for `TOKEN`.
#[allow(dead_code)]
pub async fn logged_in_app(server: &MockServer) -> (AppState, MemoryStore) {
    let (app, store) = create_test_app(server);
    SessionContext::new(Arc::new(store.clone()))
        .persist(&Session {
            auth_token: TOKEN.to_string(),
            user: sample_user(),
        })
        .await
        .expect("Failed to seed session");
    app.auth.restore().await.expect("Failed to restore session");
    (app, store)
}

/// `{success: true, data}` response.
#[allow(dead_code)]
pub fn ok_envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

/// `{success: false, message}` response.
#[allow(dead_code)]
pub fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": message}))
}
