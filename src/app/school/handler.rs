//! 学校 JSON API 处理器

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    filter::{filter_schools, normalize_term},
    model::{NewSchool, School, SchoolUpdate},
    store::SlotState,
};
use crate::app::AppState;
use crate::core::{error::CoreError, response::ApiResponse};

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// 图片"上传"结果
#[derive(Debug, Serialize)]
pub struct ImageUpload {
    pub url: String,
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound(format!("School {} not found", id))
}

/// 获取学校列表，支持 `search` 过滤
pub async fn list_schools(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<School>>>, CoreError> {
    let schools = state.with_store(|store| store.list()).await?;
    let total = schools.len();
    let filtered: Vec<School> = filter_schools(&schools, query.search.as_deref())
        .into_iter()
        .cloned()
        .collect();

    let message = match normalize_term(query.search.as_deref()) {
        Some(term) => format!(
            "Found {} of {} schools matching \"{}\"",
            filtered.len(),
            total,
            term
        ),
        None => format!("Found {} schools", total),
    };

    Ok(Json(ApiResponse::success(filtered, message)))
}

pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<School>>, CoreError> {
    let school = state
        .with_store(move |store| store.get(id))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(school, "School fetched")))
}

pub async fn create_school(
    State(state): State<AppState>,
    payload: Result<Json<NewSchool>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<School>>), CoreError> {
    let Json(fields) = payload.map_err(|e| CoreError::BadRequest(e.body_text()))?;
    let school = state.with_store(move |store| store.add(fields)).await??;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(school, "School added successfully!")),
    ))
}

pub async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SchoolUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<School>>, CoreError> {
    let Json(update) = payload.map_err(|e| CoreError::BadRequest(e.body_text()))?;
    let school = state
        .with_store(move |store| store.update(id, update))
        .await??
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(school, "School updated")))
}

pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, CoreError> {
    if state.with_store(move |store| store.delete(id)).await?? {
        Ok(Json(ApiResponse::success((), "School deleted")))
    } else {
        Err(not_found(id))
    }
}

pub async fn clear_schools(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, CoreError> {
    state.with_store(|store| store.clear()).await??;
    Ok(Json(ApiResponse::success((), "All schools cleared")))
}

/// 不会上传任何内容，只返回固定的占位图片地址
pub async fn upload_image(State(state): State<AppState>) -> Json<ApiResponse<ImageUpload>> {
    Json(ApiResponse::success(
        ImageUpload {
            url: state.ui.placeholder_image_url.clone(),
        },
        "Image uploaded successfully!",
    ))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let storage = state
        .with_store(|store| match store.slot_state() {
            Ok(SlotState::Empty) => ("empty", 0),
            Ok(SlotState::Ok) => ("ok", store.list().len()),
            Ok(SlotState::Corrupted) => ("corrupted", 0),
            Err(_) => ("unavailable", 0),
        })
        .await;
    let (storage_status, count) = storage.unwrap_or(("unavailable", 0));

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "storage": {
            "status": storage_status,
            "schools_count": count
        }
    }))
}
