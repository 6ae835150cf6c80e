use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::Trade;
use crate::repositories::trade;
use crate::services::stats::{
    self, AfterLoss, AuditReport, Dimension, GroupStats, MonthlyStats, Streaks, Summary,
};

/// 每次请求都重新拉全量再扫一遍，日志规模下没有缓存的必要
fn load_all(state: &AppState) -> Result<Vec<Trade>, AppError> {
    let mut conn = state.db_pool.get().map_err(|_| AppError::InternalServerError)?;
    trade::list_all(&mut conn).map_err(|e| {
        tracing::error!("Failed to load trades for stats: {}", e);
        AppError::InternalServerError
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub streaks: Streaks,
    pub after_loss: AfterLoss,
}

/// 总览指标：净利、胜率、期望值、盈亏比、连胜连亏、亏损后表现
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let trades = load_all(&state)?;
    Ok(Json(SummaryResponse {
        summary: stats::summary(&trades),
        streaks: stats::streaks(&trades),
        after_loss: stats::performance_after_loss(&trades),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownResponse {
    pub asset: Vec<GroupStats>,
    pub session: Vec<GroupStats>,
    pub strategy: Vec<GroupStats>,
    #[serde(rename = "entryTF")]
    pub entry_tf: Vec<GroupStats>,
    pub condition: Vec<GroupStats>,
}

/// 五个维度的回撤矩阵
pub async fn get_drawdown(
    State(state): State<AppState>,
) -> Result<Json<DrawdownResponse>, AppError> {
    let trades = load_all(&state)?;
    Ok(Json(DrawdownResponse {
        asset: stats::drawdown_by_dimension(&trades, Dimension::Asset),
        session: stats::drawdown_by_dimension(&trades, Dimension::Session),
        strategy: stats::drawdown_by_dimension(&trades, Dimension::Strategy),
        entry_tf: stats::drawdown_by_dimension(&trades, Dimension::EntryTf),
        condition: stats::drawdown_by_dimension(&trades, Dimension::Condition),
    }))
}

pub async fn get_monthly(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyStats>>, AppError> {
    let trades = load_all(&state)?;
    Ok(Json(stats::monthly_breakdown(&trades)))
}

pub async fn get_audit(State(state): State<AppState>) -> Result<Json<AuditReport>, AppError> {
    let trades = load_all(&state)?;
    Ok(Json(stats::audit_score(&trades)))
}
