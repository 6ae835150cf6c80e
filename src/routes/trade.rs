use axum::{
    routing::{get, patch},
    Router,
};

use crate::app::AppState;
use crate::handler::trade::{create_trade, delete_trade, list_trades, update_trade};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trades", get(list_trades).post(create_trade))
        .route("/trades/:id", patch(update_trade).delete(delete_trade))
}
