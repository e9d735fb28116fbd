//! Spreadsheet reconciliation end to end: import a workbook into a fresh
//! store, check what landed, export it back, and re-import the export.

use chrono::NaiveDate;
use rollcall::db::ensure_schema;
use rollcall::errors::ApiError;
use rollcall::sheet::{export_workbook, import_workbook};
use rollcall::store;
use rust_xlsxwriter::Workbook;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Build an xlsx workbook from a grid of string cells.
fn sheet_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            worksheet.write(r as u32, c as u16, *cell).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

#[actix_web::test]
async fn two_row_sheet_imports_one_checkin() {
    let pool = memory_pool().await;

    let bytes = sheet_bytes(&[
        &["ID", "Name", "Email", "2024-01-10"],
        &["S1", "Alice", "a@x.com", "present"],
        &["S2", "Bob", "b@x.com", "absent"],
    ]);

    let summary = import_workbook(&pool, &bytes).await.unwrap();
    assert_eq!(summary.students, 2);
    assert_eq!(summary.sessions, 1);

    let sessions = store::list_sessions(&pool).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].date, day("2024-01-10"));

    let students = store::list_students(&pool).await.unwrap();
    let alice = students.iter().find(|s| s.name == "Alice").unwrap();

    let present = store::list_checkins(&pool, sessions[0].id).await.unwrap();
    assert_eq!(present, vec![alice.id]);
}

#[actix_web::test]
async fn export_reproduces_the_imported_sheet_shape() {
    let pool = memory_pool().await;

    let bytes = sheet_bytes(&[
        &["ID", "Name", "Email", "2024-01-10"],
        &["S1", "Alice", "a@x.com", "present"],
        &["S2", "Bob", "b@x.com", "absent"],
    ]);
    import_workbook(&pool, &bytes).await.unwrap();

    let exported = export_workbook(&pool).await.unwrap();

    // Reading our own export back through calamine keeps the assertion at
    // the cell level rather than comparing zip bytes.
    use calamine::{Reader, Xlsx};
    let mut wb = Xlsx::new(std::io::Cursor::new(exported)).unwrap();
    let range = wb.worksheet_range_at(0).unwrap().unwrap();
    let cells: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(cells[0], vec!["ID", "Name", "Email", "2024-01-10"]);
    assert_eq!(cells[1], vec!["S1", "Alice", "a@x.com", "present"]);
    assert_eq!(cells[2], vec!["S2", "Bob", "b@x.com", "absent"]);
}

#[actix_web::test]
async fn export_import_round_trip_leaves_checkins_unchanged() {
    let pool = memory_pool().await;

    let bytes = sheet_bytes(&[
        &["ID", "Name", "Email", "2024-01-10", "2024-01-17"],
        &["S1", "Alice", "a@x.com", "present", "absent"],
        &["S2", "Bob", "b@x.com", "x", "YES"],
        &["S3", "Carol", "c@x.com", "", "no"],
    ]);
    import_workbook(&pool, &bytes).await.unwrap();

    let mut before = store::list_all_checkins(&pool).await.unwrap();
    before.sort();

    let exported = export_workbook(&pool).await.unwrap();
    let summary = import_workbook(&pool, &exported).await.unwrap();
    assert_eq!(summary.students, 3);
    assert_eq!(summary.sessions, 2);

    let mut after = store::list_all_checkins(&pool).await.unwrap();
    after.sort();
    assert_eq!(before, after);
}

#[actix_web::test]
async fn reimport_updates_students_by_email() {
    let pool = memory_pool().await;

    import_workbook(
        &pool,
        &sheet_bytes(&[
            &["ID", "Name", "Email"],
            &["S1", "Alice", "a@x.com"],
        ]),
    )
    .await
    .unwrap();

    import_workbook(
        &pool,
        &sheet_bytes(&[
            &["ID", "Name", "Email"],
            &["S1-new", "Alice Cooper", "a@x.com"],
        ]),
    )
    .await
    .unwrap();

    let students = store::list_students(&pool).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].sid, "S1-new");
    assert_eq!(students[0].name, "Alice Cooper");
}

#[actix_web::test]
async fn unparseable_date_headers_are_skipped() {
    let pool = memory_pool().await;

    let summary = import_workbook(
        &pool,
        &sheet_bytes(&[
            &["ID", "Name", "Email", "Notes", "2024-01-10"],
            &["S1", "Alice", "a@x.com", "left early", "present"],
        ]),
    )
    .await
    .unwrap();

    // "Notes" is not a session column; only one session gets created.
    assert_eq!(summary.sessions, 1);
    let sessions = store::list_sessions(&pool).await.unwrap();
    assert_eq!(sessions[0].date, day("2024-01-10"));
}

#[actix_web::test]
async fn rows_with_missing_identity_cells_are_skipped() {
    let pool = memory_pool().await;

    let summary = import_workbook(
        &pool,
        &sheet_bytes(&[
            &["ID", "Name", "Email", "2024-01-10"],
            &["S1", "Alice", "a@x.com", "present"],
            &["", "Ghost", "g@x.com", "present"],
            &["S3", "NoMail", "", "present"],
        ]),
    )
    .await
    .unwrap();

    assert_eq!(summary.students, 1);
}

#[actix_web::test]
async fn header_case_is_ignored() {
    let pool = memory_pool().await;

    let summary = import_workbook(
        &pool,
        &sheet_bytes(&[
            &["id", "NAME", "eMail", "2024-01-10"],
            &["S1", "Alice", "a@x.com", "p"],
        ]),
    )
    .await
    .unwrap();

    assert_eq!(summary.students, 1);
    assert_eq!(summary.sessions, 1);
}

#[actix_web::test]
async fn header_only_sheet_is_empty() {
    let pool = memory_pool().await;
    let err = import_workbook(&pool, &sheet_bytes(&[&["ID", "Name", "Email"]]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MalformedInput(msg) if msg == "Empty sheet"));
}

#[actix_web::test]
async fn missing_required_headers_is_an_error() {
    let pool = memory_pool().await;
    let err = import_workbook(
        &pool,
        &sheet_bytes(&[
            &["ID", "Email", "2024-01-10"],
            &["S1", "a@x.com", "present"],
        ]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::MalformedInput(msg) if msg.contains("ID, Name, Email")));
}

#[actix_web::test]
async fn garbage_bytes_are_malformed_input() {
    let pool = memory_pool().await;
    let err = import_workbook(&pool, b"this is not a zip archive")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MalformedInput(_)));
}

#[actix_web::test]
async fn repeated_date_headers_collapse_to_one_session() {
    let pool = memory_pool().await;

    let summary = import_workbook(
        &pool,
        &sheet_bytes(&[
            // Same day twice, once as ISO and once as a serial (45301 = 2024-01-10)
            &["ID", "Name", "Email", "2024-01-10", "45301"],
            &["S1", "Alice", "a@x.com", "absent", "present"],
        ]),
    )
    .await
    .unwrap();

    assert_eq!(summary.sessions, 1);
    let sessions = store::list_sessions(&pool).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].date, day("2024-01-10"));
}
