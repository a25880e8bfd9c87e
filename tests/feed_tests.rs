// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

mod common;

use common::{create_test_app, logged_in_app, ok_envelope};
use serde_json::json;
use std::time::Duration;
use uasd_client::error::AppError;
use uasd_client::models::{filter_news, ItemId};
use uasd_client::services::feeds::{self, FeedState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_news_feed_reads_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/noticias"))
        .respond_with(ok_envelope(json!([
            {"id": 1, "title": "Inicio de clases", "date": "2024-01-15", "url": "https://uasd.edu.do/1"},
            {"id": "n-2", "title": "Feria de empleo", "date": "2024-02-10"}
        ])))
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let screen = app.feed::<feeds::News>();

    let items = screen.load_on_focus().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[1].id, ItemId::Text("n-2".to_string()));
    assert_eq!(filter_news(&items, "feria").len(), 1);
    assert!(matches!(screen.state().await, FeedState::Loaded(ref v) if v.len() == 2));
}

#[tokio::test]
async fn test_events_feed_reads_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/eventos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "titulo": "Feria", "fechaEvento": "2024-03-01", "lugar": "Campus", "coordenadas": "18.46, -69.91"}
        ])))
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let items = app.feed::<feeds::Events>().load_on_focus().await.unwrap();

    assert_eq!(items[0].fecha_evento, "2024-03-01");
    assert_eq!(items[0].coordinates(), Some((18.46, -69.91)));
}

#[tokio::test]
async fn test_empty_list_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tareas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let screen = app.feed::<feeds::Tasks>();
    screen.load_on_focus().await.unwrap();

    assert!(screen.state().await.is_empty_list());
}

#[tokio::test]
async fn test_envelope_on_bare_endpoint_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let screen = app.feed::<feeds::Videos>();
    let err = screen.load_on_focus().await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
    match screen.state().await {
        FeedState::Failed(failure) => assert_eq!(failure.kind, "malformed_response"),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_feed_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deudas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let screen = app.feed::<feeds::Debts>();
    screen.load_on_focus().await.unwrap_err();

    match screen.state().await {
        FeedState::Failed(failure) => assert_eq!(failure.message, "No se pudo cargar la deuda"),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unfocus_discards_late_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/noticias"))
        .respond_with(ok_envelope(json!([])).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let screen = app.feed::<feeds::News>();

    let background = screen.clone();
    let load = tokio::spawn(async move { background.load_on_focus().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    screen.unfocus();

    assert!(load.await.unwrap().is_ok());
    assert_eq!(screen.state().await, FeedState::Loading);
}

#[tokio::test]
async fn test_feed_without_session_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/horarios"))
        .respond_with(ok_envelope(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _store) = create_test_app(&server);
    let err = app
        .feed::<feeds::Schedules>()
        .load_on_focus()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthenticated));
}
