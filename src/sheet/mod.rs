//! Spreadsheet reconciliation core: calendar-day normalization, presence
//! classification, and the xlsx importer/exporter pair. The exporter emits
//! the exact structural inverse of what the importer accepts, so an
//! export/import cycle leaves the store unchanged.

pub mod date;
pub mod export;
pub mod import;
pub mod presence;

pub use date::{DateParseError, header_day, normalize};
pub use export::export_workbook;
pub use import::{ImportSummary, import_workbook};
pub use presence::is_present;
