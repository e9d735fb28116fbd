use serde::{Deserialize, Serialize};

/// Presence record for a (student, session) pair. The pair is unique;
/// its existence is the only signal of presence (there is no "absent" row).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Checkin {
    pub id: i64,
    pub student_id: i64,
    pub session_id: i64,
}
