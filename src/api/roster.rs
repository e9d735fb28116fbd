use crate::errors::ApiError;
use crate::store;
use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;

/// Full roster, name ascending
#[utoipa::path(
    get,
    path = "/api/roster",
    responses(
        (status = 200, description = "All students", body = Vec<crate::model::Student>)
    ),
    tag = "Roster"
)]
pub async fn roster(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let students = store::list_students(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(students))
}
