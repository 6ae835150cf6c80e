use axum::{routing::post, Router};

use crate::app::AppState;
use crate::handler::upload::upload_image;

pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload_image))
}
