#![allow(dead_code)]

use std::{io, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use school_directory::{
    app::school::store::SchoolStore,
    build_router,
    config::UiConfig,
    infrastructure::storage::{MemoryBackend, StorageBackend},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

/// 读取为空、写入总是失败的后端
pub struct FailingBackend;

impl StorageBackend for FailingBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, _value: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn clear(&self) -> io::Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

pub fn test_ui() -> UiConfig {
    UiConfig {
        submit_delay_ms: 0,
        ..UiConfig::default()
    }
}

pub fn app_with_backend(backend: Box<dyn StorageBackend>) -> Router {
    let state = AppState::new(SchoolStore::new(backend), test_ui());
    build_router(state, Duration::from_secs(5))
}

pub fn app() -> Router {
    app_with_backend(Box::new(MemoryBackend::new()))
}

pub fn school_json(name: &str, city: &str, state: &str) -> Value {
    serde_json::json!({
        "name": name,
        "address": "221B Baker Street",
        "city": city,
        "state": state,
        "contact": "0123456789",
        "email_id": "office@example.org",
        "image": ""
    })
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let (status, text) = send(app, req).await;
    let value = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, req).await
}
