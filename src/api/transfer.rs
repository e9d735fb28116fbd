use crate::errors::ApiError;
use crate::sheet;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder, web};
use futures_util::TryStreamExt;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Import an attendance spreadsheet
#[utoipa::path(
    post,
    path = "/api/import",
    responses(
        (status = 200, description = "Import summary for a multipart form with an xlsx `file` field", body = crate::sheet::ImportSummary),
        (status = 400, description = "No file, empty sheet, or missing headers", body = Object, example = json!({
            "ok": false, "error": "Missing required headers: ID, Name, Email"
        }))
    ),
    tag = "Transfer"
)]
pub async fn import_sheet(
    pool: web::Data<SqlitePool>,
    mut payload: Multipart,
) -> Result<impl Responder, ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::MalformedInput(format!("Invalid multipart payload: {e}")))?
    {
        let is_file = field.content_disposition().get_name() == Some("file");

        // Non-file fields still have to be drained off the stream.
        let mut buf = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::MalformedInput(format!("Upload interrupted: {e}")))?
        {
            if is_file {
                buf.extend_from_slice(&chunk);
            }
        }
        if is_file {
            file_bytes = Some(buf);
        }
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::Validation("No file".to_string()))?;

    let summary = sheet::import_workbook(pool.get_ref(), &bytes).await?;
    info!(
        students = summary.students,
        sessions = summary.sessions,
        "Spreadsheet imported"
    );

    Ok(HttpResponse::Ok().json(json!({
        "ok": true,
        "students": summary.students,
        "sessions": summary.sessions
    })))
}

/// Export the store as an attendance spreadsheet
#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "Binary xlsx workbook, attachment `attendance_export.xlsx`")
    ),
    tag = "Transfer"
)]
pub async fn export_sheet(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let bytes = sheet::export_workbook(pool.get_ref()).await?;

    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header((
            "Content-Disposition",
            r#"attachment; filename="attendance_export.xlsx""#,
        ))
        .body(bytes))
}
