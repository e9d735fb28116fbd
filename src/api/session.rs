use crate::api::parse_day;
use crate::errors::ApiError;
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SessionRequest {
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: Option<String>,
}

/// List sessions, date ascending
#[utoipa::path(
    get,
    path = "/api/sessions",
    responses(
        (status = 200, description = "All sessions", body = Vec<crate::model::Session>)
    ),
    tag = "Sessions"
)]
pub async fn list_sessions(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let sessions = store::list_sessions(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(sessions))
}

/// Ensure a session exists for a day
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session upserted", body = Object, example = json!({
            "ok": true, "session": {"id": 1, "date": "2024-01-10"}
        })),
        (status = 400, description = "Missing or invalid date")
    ),
    tag = "Sessions"
)]
pub async fn create_session(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SessionRequest>,
) -> Result<impl Responder, ApiError> {
    let Some(date) = payload.date.as_deref() else {
        return Err(ApiError::Validation("date required".to_string()));
    };
    let day = parse_day(date)?;

    let session = store::upsert_session(pool.get_ref(), day).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "session": session })))
}

/// Clear a session and its check-ins
#[utoipa::path(
    post,
    path = "/api/clear",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session cleared; count of check-ins removed", body = Object, example = json!({
            "ok": true, "cleared": 17
        })),
        (status = 400, description = "Missing or invalid date")
    ),
    tag = "Sessions"
)]
pub async fn clear_session(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SessionRequest>,
) -> Result<impl Responder, ApiError> {
    let Some(date) = payload.date.as_deref() else {
        return Err(ApiError::Validation("date required".to_string()));
    };
    let day = parse_day(date)?;

    // Nothing to clear is a zero count, not an error.
    let Some(session) = store::find_session(pool.get_ref(), day).await? else {
        return Ok(HttpResponse::Ok().json(json!({
            "ok": true,
            "cleared": 0,
            "message": "No session for that date"
        })));
    };

    let cleared = store::delete_checkins(pool.get_ref(), None, Some(session.id)).await?;
    store::delete_session(pool.get_ref(), session.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "ok": true, "cleared": cleared })))
}
