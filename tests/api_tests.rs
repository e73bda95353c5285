mod common;

use axum::http::StatusCode;
use common::{app, app_with_backend, school_json, send_json};
use school_directory::infrastructure::storage::{FileBackend, MemoryBackend};

#[tokio::test]
async fn test_create_then_list() {
    let app = app();

    let (status, body) = send_json(&app, "GET", "/api/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/schools",
        Some(school_json("Hogwarts", "Highlands", "Scotland")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let school = &created["data"];
    assert_eq!(school["name"], "Hogwarts");
    assert_eq!(school["created_at"], school["updated_at"]);
    assert!(school.get("image").is_none());

    let (_, body) = send_json(&app, "GET", "/api/schools", None).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(&list[0], school);
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = app();

    let mut payload = school_json("Hogwarts", "Highlands", "Scotland");
    payload["contact"] = "012345678".into();
    payload["email_id"] = "owl post".into();

    let (status, body) = send_json(&app, "POST", "/api/schools", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert_eq!(
        body["fields"]["contact"][0],
        "Contact must be a valid 10-digit number"
    );
    assert_eq!(body["fields"]["email_id"][0], "Please enter a valid email address");

    let (_, body) = send_json(&app, "GET", "/api/schools", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_rejects_lifecycle_fields() {
    let app = app();

    let mut payload = school_json("Hogwarts", "Highlands", "Scotland");
    payload["created_at"] = "2000-01-01T00:00:00.000Z".into();

    let (status, body) = send_json(&app, "POST", "/api/schools", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_update_and_not_found() {
    let app = app();

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/schools",
        Some(school_json("Hogwarts", "Highlands", "Scotland")),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, updated) = send_json(
        &app,
        "PATCH",
        &format!("/api/schools/{}", id),
        Some(serde_json::json!({ "city": "Hogsmeade" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["city"], "Hogsmeade");
    assert_eq!(updated["data"]["name"], "Hogwarts");
    assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);
    assert!(
        updated["data"]["updated_at"].as_str().unwrap()
            >= created["data"]["updated_at"].as_str().unwrap()
    );

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/schools/{}", missing),
        Some(serde_json::json!({ "city": "Nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = send_json(&app, "GET", &format!("/api/schools/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_clear() {
    let app = app();

    let mut ids = Vec::new();
    for name in ["Alpha", "Beta", "Gamma"] {
        let (_, created) = send_json(
            &app,
            "POST",
            "/api/schools",
            Some(school_json(name, "Springfield", "Illinois")),
        )
        .await;
        ids.push(created["data"]["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send_json(&app, "DELETE", &format!("/api/schools/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "DELETE", &format!("/api/schools/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send_json(&app, "GET", "/api/schools", None).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gamma", "Alpha"]);

    let (status, _) = send_json(&app, "DELETE", "/api/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send_json(&app, "GET", "/api/schools", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_filter() {
    let app = app();
    for (name, city, state) in [
        ("Riverside Elementary", "Portland", "Oregon"),
        ("Lakeview High", "Chicago", "Illinois"),
        ("Mountain Prep", "Denver", "Colorado"),
    ] {
        send_json(&app, "POST", "/api/schools", Some(school_json(name, city, state))).await;
    }

    let (_, body) = send_json(&app, "GET", "/api/schools?search=ILLINOIS", None).await;
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Lakeview High");

    let (_, body) = send_json(&app, "GET", "/api/schools?search=nothing-here", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_image_returns_placeholder() {
    let app = app();
    let (status, body) = send_json(&app, "POST", "/api/images", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://images.pexels.com/"));
}

#[tokio::test]
async fn test_health_reports_corrupted_storage() {
    let app = app_with_backend(Box::new(MemoryBackend::with_value("definitely not json")));

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"]["status"], "corrupted");

    // 列表按空集合处理
    let (status, body) = send_json(&app, "GET", "/api/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let app = app_with_backend(Box::new(FileBackend::new(dir.path(), "schools_data")));
    let (status, _) = send_json(&app, "POST", "/api/schools", Some(school_json("Harbor School", "Portland", "Maine"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(dir.path().join("schools_data.json").exists());

    // 新的路由与存储实例读取同一个文件
    let app = app_with_backend(Box::new(FileBackend::new(dir.path(), "schools_data")));
    let (status, body) = send_json(&app, "GET", "/api/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Harbor School");

    let (status, _) = send_json(&app, "DELETE", "/api/schools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!dir.path().join("schools_data.json").exists());
}
