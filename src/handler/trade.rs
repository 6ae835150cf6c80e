use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use diesel::result::Error as DieselError;
use serde_json::Value;

use crate::api_models::{parse_new_trade, parse_trade_patch, TradeResponse};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::repositories::trade;

/// 获取全部交易记录，过滤和统计都由调用方在内存里完成
pub async fn list_trades(
    State(state): State<AppState>,
) -> Result<Json<Vec<TradeResponse>>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    let rows = trade::list_all(&mut conn).map_err(|e| {
        tracing::error!("Failed to list trades: {}", e);
        AppError::InternalServerError
    })?;

    let response: Vec<TradeResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// 创建一条交易日志，校验失败时返回第一个出错字段
pub async fn create_trade(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<TradeResponse>), AppError> {
    let new_trade = parse_new_trade(&body)?;

    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    let created = trade::create(&mut conn, &new_trade).map_err(|e| {
        tracing::error!("Failed to create trade: {}", e);
        AppError::InternalServerError
    })?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// 部分更新；目标不存在返回 404
pub async fn update_trade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<TradeResponse>, AppError> {
    let patch = parse_trade_patch(&body)?;

    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    // 空 changeset 交给 diesel 会报错，按原样返回当前行
    if patch.is_empty() {
        let existing = trade::find_by_id(&mut conn, id)
            .map_err(|e| {
                tracing::error!("Failed to load trade {}: {}", id, e);
                AppError::InternalServerError
            })?
            .ok_or(AppError::NotFound("Trade not found"))?;
        return Ok(Json(existing.into()));
    }

    let updated = trade::update_by_id(&mut conn, id, &patch).map_err(|e| match e {
        DieselError::NotFound => AppError::NotFound("Trade not found"),
        _ => {
            tracing::error!("Failed to update trade {}: {}", id, e);
            AppError::InternalServerError
        }
    })?;

    Ok(Json(updated.into()))
}

/// 硬删除；目标不存在也返回 204，删除是幂等的
pub async fn delete_trade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;

    trade::delete_by_id(&mut conn, id).map_err(|e| {
        tracing::error!("Failed to delete trade {}: {}", id, e);
        AppError::InternalServerError
    })?;

    Ok(StatusCode::NO_CONTENT)
}
