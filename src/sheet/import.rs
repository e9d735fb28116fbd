use crate::errors::ApiError;
use crate::sheet::{header_day, is_present};
use crate::store;
use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::{debug, warn};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportSummary {
    /// Total students now in the store (not just this file's rows)
    #[schema(example = 42)]
    pub students: i64,
    /// Distinct session days touched by this file
    #[schema(example = 12)]
    pub sessions: i64,
}

/// Render a cell the way a spreadsheet user sees it. Whole-number floats
/// lose the trailing `.0` so a `1` typed into a presence cell matches the
/// token table.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn header_position(headers: &[String], wanted: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(wanted))
}

/// Parse an xlsx file and reconcile it against the store.
///
/// Fixed columns `ID`/`Name`/`Email` (matched case-insensitively) identify
/// students by email; every other header that normalizes to a calendar day
/// becomes a session column. Unparseable headers and incomplete rows are
/// skipped, never fatal: a messy file still imports its good rows. The
/// import is deliberately not one transaction, so a cancelled run leaves a
/// partially-imported but individually-consistent store.
pub async fn import_workbook(pool: &SqlitePool, bytes: &[u8]) -> Result<ImportSummary, ApiError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| ApiError::MalformedInput(format!("Not a valid xlsx file: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ApiError::MalformedInput("Workbook has no sheets".to_string()))?
        .map_err(|e| ApiError::MalformedInput(format!("Failed to read sheet: {e}")))?;

    let mut rows = range.rows();
    let header_row = match rows.next() {
        Some(row) if range.height() > 1 => row,
        _ => return Err(ApiError::MalformedInput("Empty sheet".to_string())),
    };

    let headers: Vec<String> = header_row.iter().map(|c| cell_text(c).trim().to_string()).collect();

    let id_col = header_position(&headers, "id");
    let name_col = header_position(&headers, "name");
    let email_col = header_position(&headers, "email");
    let (Some(id_col), Some(name_col), Some(email_col)) = (id_col, name_col, email_col) else {
        return Err(ApiError::MalformedInput(
            "Missing required headers: ID, Name, Email".to_string(),
        ));
    };

    // Every remaining column is a date column candidate; headers that do
    // not normalize are dropped here.
    let mut date_columns: Vec<(usize, NaiveDate)> = Vec::new();
    for (col, cell) in header_row.iter().enumerate() {
        if col == id_col || col == name_col || col == email_col {
            continue;
        }
        match header_day(cell) {
            Some(day) => date_columns.push((col, day)),
            None => {
                let text = cell_text(cell);
                if !text.trim().is_empty() {
                    warn!(header = %text, "Skipping unparseable date column");
                }
            }
        }
    }

    // One session per distinct day, even when the file repeats a date.
    let mut session_ids: HashMap<NaiveDate, i64> = HashMap::new();
    for (_, day) in &date_columns {
        if !session_ids.contains_key(day) {
            let session = store::upsert_session(pool, *day).await?;
            session_ids.insert(*day, session.id);
        }
    }

    let mut rows_imported = 0usize;
    let mut rows_skipped = 0usize;

    for row in rows {
        let cell_at = |col: usize| row.get(col).map(cell_text).unwrap_or_default();

        let sid = cell_at(id_col).trim().to_string();
        let name = cell_at(name_col).trim().to_string();
        let email = cell_at(email_col).trim().to_string();
        if sid.is_empty() || name.is_empty() || email.is_empty() {
            rows_skipped += 1;
            continue;
        }

        let student = store::upsert_student(pool, &email, &sid, &name).await?;
        rows_imported += 1;

        for (col, day) in &date_columns {
            if !is_present(&cell_at(*col)) {
                continue;
            }
            let Some(session_id) = session_ids.get(day) else {
                continue;
            };
            // Idempotent: re-importing an already-recorded presence is fine.
            store::upsert_checkin(pool, student.id, *session_id).await?;
        }
    }

    debug!(rows_imported, rows_skipped, sessions = session_ids.len(), "Import finished");

    Ok(ImportSummary {
        students: store::count_students(pool).await?,
        sessions: session_ids.len() as i64,
    })
}
