pub mod checkin;
pub mod roster;
pub mod session;
pub mod transfer;

use crate::errors::ApiError;
use chrono::NaiveDate;

/// Wire dates are `YYYY-MM-DD` only; parsed as literal components so the
/// calendar day never shifts with the host timezone.
pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("Invalid date: {raw}")))
}
