use crate::api::parse_day;
use crate::errors::ApiError;
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    #[schema(example = 1)]
    pub student_id: Option<i64>,
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub session_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckinsQuery {
    pub date: Option<String>,
}

/// Kiosk check-in
#[utoipa::path(
    post,
    path = "/api/checkin",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Checked in", body = Object, example = json!({"ok": true})),
        (status = 400, description = "Missing fields or already checked in", body = Object, example = json!({
            "ok": false, "error": "Already checked in"
        }))
    ),
    tag = "Kiosk"
)]
pub async fn check_in(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CheckinRequest>,
) -> Result<impl Responder, ApiError> {
    let (Some(student_id), Some(session_date)) =
        (payload.student_id, payload.session_date.as_deref())
    else {
        return Err(ApiError::Validation(
            "studentId and sessionDate required".to_string(),
        ));
    };

    let day = parse_day(session_date)?;

    // First check-in of the day creates the session.
    let session = store::upsert_session(pool.get_ref(), day).await?;
    store::create_checkin(pool.get_ref(), student_id, session.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// Undo a kiosk check-in
#[utoipa::path(
    delete,
    path = "/api/checkin",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Check-in removed", body = Object, example = json!({"ok": true})),
        (status = 404, description = "Session or check-in not found", body = Object, example = json!({
            "ok": false, "error": "Not checked in"
        }))
    ),
    tag = "Kiosk"
)]
pub async fn undo_check_in(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CheckinRequest>,
) -> Result<impl Responder, ApiError> {
    let (Some(student_id), Some(session_date)) =
        (payload.student_id, payload.session_date.as_deref())
    else {
        return Err(ApiError::Validation(
            "studentId and sessionDate required".to_string(),
        ));
    };

    let day = parse_day(session_date)?;

    let session = store::find_session(pool.get_ref(), day)
        .await?
        .ok_or_else(|| ApiError::NotFound("No session for that date".to_string()))?;

    let removed =
        store::delete_checkins(pool.get_ref(), Some(student_id), Some(session.id)).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Not checked in".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// Who is checked in on a given day
#[utoipa::path(
    get,
    path = "/api/checkins",
    params(
        ("date", Query, description = "Calendar day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Student ids checked in that day", body = Object, example = json!({
            "ok": true, "studentIds": [1, 4]
        }))
    ),
    tag = "Kiosk"
)]
pub async fn list_checkins(
    pool: web::Data<SqlitePool>,
    query: web::Query<CheckinsQuery>,
) -> Result<impl Responder, ApiError> {
    let Some(date) = query.date.as_deref() else {
        return Err(ApiError::Validation("date required".to_string()));
    };
    let day = parse_day(date)?;

    // No session for that day is an empty list, not an error.
    let Some(session) = store::find_session(pool.get_ref(), day).await? else {
        return Ok(HttpResponse::Ok().json(json!({ "ok": true, "studentIds": [] })));
    };

    let student_ids = store::list_checkins(pool.get_ref(), session.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true, "studentIds": student_ids })))
}
