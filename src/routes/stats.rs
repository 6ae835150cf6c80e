use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::stats::{get_audit, get_drawdown, get_monthly, get_summary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats/summary", get(get_summary))
        .route("/stats/drawdown", get(get_drawdown))
        .route("/stats/monthly", get(get_monthly))
        .route("/stats/audit", get(get_audit))
}
