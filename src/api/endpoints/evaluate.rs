//! Handwriting evaluation proxy — `POST /api/evaluate`.
//!
//! Receives a multipart answer sheet (`file`, `question`, `marks`),
//! validates it, and forwards it to the gateway's OCR + evaluation
//! pipeline. The mains marking scheme only has 10-, 15- and 20-mark
//! questions, so anything else is rejected before the upstream call.

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::Value;

use crate::api::error::ProxyError;
use crate::api::types::ApiContext;
use crate::normalize::evaluation_response;

const ALLOWED_MARKS: &[i64] = &[10, 15, 20];
const DEFAULT_MARKS: i64 = 15;

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// `POST /api/evaluate` — forward a handwritten answer for evaluation.
pub async fn evaluate(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ProxyError> {
    let mut file: Option<UploadedFile> = None;
    let mut question = String::new();
    let mut marks = DEFAULT_MARKS;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ProxyError::InvalidRequest(format!("unreadable multipart body: {e}"))
    })? {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("answer").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ProxyError::InvalidRequest(format!("unreadable file field: {e}"))
                })?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "question" => {
                question = field.text().await.map_err(|e| {
                    ProxyError::InvalidRequest(format!("unreadable question field: {e}"))
                })?;
            }
            "marks" => {
                let raw = field.text().await.map_err(|e| {
                    ProxyError::InvalidRequest(format!("unreadable marks field: {e}"))
                })?;
                marks = raw.trim().parse().map_err(|_| {
                    ProxyError::InvalidRequest(format!("marks must be an integer, got {raw:?}"))
                })?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ProxyError::InvalidRequest("file is required".into()))?;
    if question.trim().is_empty() {
        return Err(ProxyError::InvalidRequest("question is required".into()));
    }
    if !ALLOWED_MARKS.contains(&marks) {
        return Err(ProxyError::InvalidRequest(format!(
            "marks must be one of 10, 15 or 20, got {marks}"
        )));
    }

    let mut part =
        reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename);
    if let Some(mime) = &file.content_type {
        part = part.mime_str(mime).map_err(|e| {
            ProxyError::InvalidRequest(format!("invalid file content type: {e}"))
        })?;
    }
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("question", question.trim().to_string())
        .text("marks", marks.to_string());

    let raw = ctx.gateway.evaluate_handwritten(form).await.map_err(|e| {
        ProxyError::from_upstream(
            "API Gateway",
            ctx.gateway.base_url(),
            &format!(
                "Check API gateway at {} and ensure its port is open",
                ctx.gateway.base_url()
            ),
            e,
        )
    })?;

    Ok(Json(evaluation_response(raw)))
}
