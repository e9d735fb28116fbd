use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One dated attendance-taking event. At most one session exists per
/// calendar day; the date carries no time-of-day or timezone.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Session {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub date: NaiveDate,
}
