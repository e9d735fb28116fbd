use crate::api::checkin::{CheckinRequest, CheckinsQuery};
use crate::api::session::SessionRequest;
use crate::model::{Session, Student};
use crate::sheet::ImportSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = r#"
## Attendance kiosk service

Students check themselves in for dated sessions; an administrator manages
sessions and moves rosters in and out as xlsx spreadsheets.

### Key Features
- **Kiosk check-in**
  - Check in, undo a check-in, and list who is present on a day
- **Session management**
  - One session per calendar day; clear a session with its check-ins
- **Roster transfer**
  - Import/export the whole store as an attendance spreadsheet

### Response Format
- JSON everywhere except `/export` (binary xlsx)
- Errors are `{ok: false, error: message}` with 400/404 status codes

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::checkin::check_in,
        crate::api::checkin::undo_check_in,
        crate::api::checkin::list_checkins,

        crate::api::session::list_sessions,
        crate::api::session::create_session,
        crate::api::session::clear_session,

        crate::api::roster::roster,

        crate::api::transfer::import_sheet,
        crate::api::transfer::export_sheet
    ),
    components(
        schemas(
            CheckinRequest,
            CheckinsQuery,
            SessionRequest,
            Student,
            Session,
            ImportSummary
        )
    ),
    tags(
        (name = "Kiosk", description = "Student self check-in APIs"),
        (name = "Sessions", description = "Session management APIs"),
        (name = "Roster", description = "Roster listing APIs"),
        (name = "Transfer", description = "Spreadsheet import/export APIs"),
    )
)]
pub struct ApiDoc;
