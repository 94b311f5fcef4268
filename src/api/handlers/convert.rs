use axum::{Json, extract::Multipart, extract::State};

use crate::AppState;
use crate::api::error::AppError;
use crate::services::orchestrator::convert_upload;
use crate::services::report::RenderPayload;
use crate::utils::validation::{sanitize_filename, validate_extension};

/// One upload in, one finished conversion out. The extension allow-list is
/// enforced here at the HTTP boundary; the orchestrator behind it assumes a
/// valid upload.
#[utoipa::path(
    post,
    path = "/convert",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Multipart form with a single `file` field"
    ),
    responses(
        (status = 200, description = "Conversion finished (including converter-level failures, which are reported in the preview text)", body = RenderPayload),
        (status = 400, description = "Missing file field, empty filename, or unsupported extension"),
        (status = 413, description = "Upload exceeds the configured size limit"),
        (status = 500, description = "Filesystem failure")
    ),
    tag = "convert"
)]
pub async fn convert_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RenderPayload>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field.file_name().unwrap_or_default().to_string();
        let filename =
            sanitize_filename(&original_filename).map_err(|e| AppError::BadRequest(e.to_string()))?;
        validate_extension(&filename).map_err(|e| AppError::BadRequest(e.to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        upload = Some((filename, bytes.to_vec()));
    }

    let (filename, bytes) = upload.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    tracing::info!(filename = %filename, size = bytes.len(), "converting upload");

    let payload = convert_upload(&state.config, state.converter.as_ref(), &filename, &bytes).await?;

    tracing::info!(
        filename = %filename,
        original_bytes = payload.original_bytes,
        converted_bytes = payload.converted_bytes,
        reduction_percent = payload.reduction_percent,
        "conversion finished"
    );

    Ok(Json(payload))
}
