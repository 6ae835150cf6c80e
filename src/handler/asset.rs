use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::api_models::{AssetResponse, CreateAssetRequest};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::NewAsset;
use crate::repositories::asset;

impl From<crate::models::Asset> for AssetResponse {
    fn from(a: crate::models::Asset) -> Self {
        Self {
            id: a.id,
            name: a.name,
            type_: a.type_,
            url: a.url,
            size: a.size,
            created_at: a.created_at,
        }
    }
}

pub async fn list_assets(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssetResponse>>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    let rows = asset::list_all(&mut conn).map_err(|e| {
        tracing::error!("Failed to list assets: {}", e);
        AppError::InternalServerError
    })?;

    let response: Vec<AssetResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

pub async fn create_asset(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<AssetResponse>), AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    let new_asset = NewAsset {
        name: payload.name,
        type_: payload.type_,
        url: payload.url,
        size: payload.size,
        created_at: Some(Utc::now().naive_utc()),
    };

    let created = asset::create(&mut conn, &new_asset).map_err(|e| {
        tracing::error!("Failed to create asset: {}", e);
        AppError::InternalServerError
    })?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    asset::delete_by_id(&mut conn, id).map_err(|e| {
        tracing::error!("Failed to delete asset {}: {}", id, e);
        AppError::InternalServerError
    })?;

    Ok(StatusCode::NO_CONTENT)
}
