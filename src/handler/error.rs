use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api_models::FieldError;

#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
    BadRequest(String),
    Validation { message: String, field: String },
    InternalServerError,
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::Validation {
            message: err.message,
            field: err.field.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": msg }))).into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response()
            }
            AppError::Validation { message, field } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "field": field })),
            )
                .into_response(),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "internal server error" })),
            )
                .into_response(),
        }
    }
}
