use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::app::AppState;
use crate::handler::error::AppError;

#[derive(Serialize)]
pub struct UploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// 接收 multipart 的 tradeImage 字段，落盘后返回相对 URL。
/// 不做类型和大小校验，也不清理被替换的旧文件。
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("tradeImage") {
            continue;
        }

        let ext = field
            .file_name()
            .and_then(|name| Path::new(name).extension().map(|e| e.to_string_lossy().to_string()))
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read upload body: {}", e);
            AppError::InternalServerError
        })?;

        tokio::fs::create_dir_all(&state.upload_dir).await.map_err(|e| {
            tracing::error!("Failed to create upload dir: {}", e);
            AppError::InternalServerError
        })?;

        // 时间戳加随机数保证文件名唯一
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        let filename = format!("tradeImage-{}-{}{}", Utc::now().timestamp_millis(), suffix, ext);

        let dest = Path::new(&state.upload_dir).join(&filename);
        tokio::fs::write(&dest, &data).await.map_err(|e| {
            tracing::error!("Failed to write {}: {}", dest.display(), e);
            AppError::InternalServerError
        })?;

        tracing::info!("Stored upload {} ({} bytes)", filename, data.len());
        return Ok(Json(UploadResponse {
            image_url: format!("/uploads/{}", filename),
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
