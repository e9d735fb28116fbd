use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Roster entry. `email` is the natural key: imports deduplicate on it,
/// while `sid` (the school-issued identifier) is free text and may repeat.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "sid": "S-1042",
        "name": "Alice Cooper",
        "email": "alice@example.edu"
    })
)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "S-1042")]
    pub sid: String,

    #[schema(example = "Alice Cooper")]
    pub name: String,

    #[schema(example = "alice@example.edu")]
    pub email: String,
}
