//! Attendance store: all reads and writes for students, sessions and
//! checkins. Every upsert is a single `INSERT ... ON CONFLICT` statement so
//! the unique constraints, not a check-then-act sequence, decide races.

use crate::errors::ApiError;
use crate::model::{Checkin, Session, Student};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

/// Return the session for `day`, creating it when missing. Idempotent.
pub async fn upsert_session(pool: &SqlitePool, day: NaiveDate) -> Result<Session, sqlx::Error> {
    // DO UPDATE (a no-op rewrite of the key) instead of DO NOTHING so the
    // RETURNING clause yields the existing row on conflict.
    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (date) VALUES (?)
        ON CONFLICT(date) DO UPDATE SET date = excluded.date
        RETURNING id, date
        "#,
    )
    .bind(day)
    .fetch_one(pool)
    .await
}

pub async fn find_session(
    pool: &SqlitePool,
    day: NaiveDate,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>("SELECT id, date FROM sessions WHERE date = ?")
        .bind(day)
        .fetch_optional(pool)
        .await
}

/// Delete a session; its checkins go with it (ON DELETE CASCADE).
pub async fn delete_session(pool: &SqlitePool, session_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Match by email (the natural key); update `sid`/`name` on match, insert
/// otherwise. Returns the stored row either way.
pub async fn upsert_student(
    pool: &SqlitePool,
    email: &str,
    sid: &str,
    name: &str,
) -> Result<Student, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students (sid, name, email) VALUES (?, ?, ?)
        ON CONFLICT(email) DO UPDATE SET sid = excluded.sid, name = excluded.name
        RETURNING id, sid, name, email
        "#,
    )
    .bind(sid)
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
}

/// Strict checkin create: the kiosk path. A second checkin for the same
/// (student, session) pair surfaces as `DuplicateCheckin`, decided by the
/// unique constraint at insert time.
pub async fn create_checkin(
    pool: &SqlitePool,
    student_id: i64,
    session_id: i64,
) -> Result<Checkin, ApiError> {
    let result = sqlx::query_as::<_, Checkin>(
        r#"
        INSERT INTO checkins (student_id, session_id) VALUES (?, ?)
        RETURNING id, student_id, session_id
        "#,
    )
    .bind(student_id)
    .bind(session_id)
    .fetch_one(pool)
    .await;

    match result {
        Ok(checkin) => Ok(checkin),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                    return Err(ApiError::DuplicateCheckin);
                }
            }
            Err(ApiError::Database(e))
        }
    }
}

/// Tolerant checkin create: the import path. Returns whether a row was
/// actually inserted; an existing pair is left untouched.
pub async fn upsert_checkin(
    pool: &SqlitePool,
    student_id: i64,
    session_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO checkins (student_id, session_id) VALUES (?, ?)
        ON CONFLICT(student_id, session_id) DO NOTHING
        "#,
    )
    .bind(student_id)
    .bind(session_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Bulk delete checkins matching the given filter; returns the count removed.
pub async fn delete_checkins(
    pool: &SqlitePool,
    student_id: Option<i64>,
    session_id: Option<i64>,
) -> Result<u64, sqlx::Error> {
    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<i64> = Vec::new();

    if let Some(student_id) = student_id {
        conditions.push("student_id = ?");
        bindings.push(student_id);
    }
    if let Some(session_id) = session_id {
        conditions.push("session_id = ?");
        bindings.push(session_id);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("DELETE FROM checkins {}", where_clause);
    debug!(sql = %sql, bindings = ?bindings, "Deleting checkins");

    let mut query = sqlx::query(&sql);
    for b in &bindings {
        query = query.bind(b);
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn list_checkins(pool: &SqlitePool, session_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT student_id FROM checkins WHERE session_id = ?")
        .bind(session_id)
        .fetch_all(pool)
        .await
}

/// Flat (student_id, session_id) pair set, for the exporter.
pub async fn list_all_checkins(pool: &SqlitePool) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>("SELECT student_id, session_id FROM checkins")
        .fetch_all(pool)
        .await
}

pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, sid, name, email FROM students ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn count_students(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await
}

pub async fn list_sessions(pool: &SqlitePool) -> Result<Vec<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>("SELECT id, date FROM sessions ORDER BY date ASC")
        .fetch_all(pool)
        .await
}
