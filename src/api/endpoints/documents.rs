//! Document/image upload proxy — `POST /api/documents/upload`.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::Value;

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;

/// `POST /api/documents/upload` — forward the `file` part to the
/// ingestion service. PDFs and images share this endpoint; the
/// ingestion service routes images through OCR itself.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ProxyError> {
    let mut part: Option<reqwest::multipart::Part> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ProxyError::InvalidRequest(format!("unreadable multipart body: {e}"))
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            ProxyError::InvalidRequest(format!("unreadable file field: {e}"))
        })?;

        let mut p = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(filename);
        if let Some(mime) = &content_type {
            p = p.mime_str(mime).map_err(|e| {
                ProxyError::InvalidRequest(format!("invalid file content type: {e}"))
            })?;
        }
        part = Some(p);
    }

    let part = part.ok_or_else(|| ProxyError::InvalidRequest("file is required".into()))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let data = ctx.ingest.upload(form).await.map_err(|e| {
        ProxyError::from_upstream(
            "ingestion service",
            ctx.ingest.base_url(),
            "Check that the document service is running at the configured URL",
            e,
        )
    })?;

    Ok(Json(data))
}
