use crate::errors::ApiError;
use crate::store;
use rust_xlsxwriter::Workbook;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Render the store as an xlsx workbook: fixed `ID, Name, Email` columns,
/// then one column per session (header `YYYY-MM-DD`, ascending), one row
/// per student (by name), cells `present`/`absent`. This is the exact
/// inverse of the importer's layout, so exports re-import cleanly.
pub async fn export_workbook(pool: &SqlitePool) -> Result<Vec<u8>, ApiError> {
    let students = store::list_students(pool).await?;
    let sessions = store::list_sessions(pool).await?;
    let checkins = store::list_all_checkins(pool).await?;

    let present: HashSet<(i64, i64)> = checkins.into_iter().collect();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance")?;

    worksheet.write(0, 0, "ID")?;
    worksheet.write(0, 1, "Name")?;
    worksheet.write(0, 2, "Email")?;
    for (i, session) in sessions.iter().enumerate() {
        let header = session.date.format("%Y-%m-%d").to_string();
        worksheet.write(0, (3 + i) as u16, header)?;
    }

    for (r, student) in students.iter().enumerate() {
        let row = (r + 1) as u32;
        worksheet.write(row, 0, student.sid.as_str())?;
        worksheet.write(row, 1, student.name.as_str())?;
        worksheet.write(row, 2, student.email.as_str())?;
        for (i, session) in sessions.iter().enumerate() {
            let mark = if present.contains(&(student.id, session.id)) {
                "present"
            } else {
                "absent"
            };
            worksheet.write(row, (3 + i) as u16, mark)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    Ok(bytes)
}
