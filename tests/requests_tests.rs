// SPDX-License-Identifier: MIT
// Copyright 2026 UASD Client Contributors

mod common;

use common::{logged_in_app, ok_envelope, rejected};
use serde_json::json;
use uasd_client::error::AppError;
use uasd_client::models::RequestKind;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_request_then_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crear_solicitud"))
        .and(body_json(json!({"tipo": "beca", "descripcion": "Beca de excelencia"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mis_solicitudes"))
        .respond_with(ok_envelope(json!([
            {"id": 7, "tipo": "beca", "descripcion": "Beca de excelencia", "estado": "pendiente"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let mut workflow = app.requests();

    let records = workflow
        .create(RequestKind::Beca, "  Beca de excelencia ")
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 7);
    assert_eq!(records[0].estado, "pendiente");
}

#[tokio::test]
async fn test_create_request_requires_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crear_solicitud"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let err = app
        .requests()
        .create(RequestKind::CartaEstudio, "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_cancel_request_sends_bare_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancelar_solicitud"))
        .and(body_json(json!(7)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mis_solicitudes"))
        .respond_with(ok_envelope(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let mut workflow = app.requests();

    assert!(workflow.cancel(7).await.unwrap().is_empty());
    assert_eq!(workflow.records().map(<[_]>::len), Some(0));
}

#[tokio::test]
async fn test_rejected_cancel_skips_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancelar_solicitud"))
        .respond_with(rejected("La solicitud ya fue procesada"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mis_solicitudes"))
        .respond_with(ok_envelope(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _store) = logged_in_app(&server).await;
    let err = app.requests().cancel(7).await.unwrap_err();

    assert_eq!(err.user_message(), "La solicitud ya fue procesada");
}

#[tokio::test]
async fn test_request_kinds_offered() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_app(&server).await;

    let codes: Vec<_> = app.requests().kinds().iter().map(|k| k.code()).collect();
    assert_eq!(codes, vec!["beca", "carta_estudio", "record_nota"]);
}
