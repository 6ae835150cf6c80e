use axum::{
    routing::{delete, get},
    Router,
};

use crate::app::AppState;
use crate::handler::asset::{create_asset, delete_asset, list_assets};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route("/assets/:id", delete(delete_asset))
}
