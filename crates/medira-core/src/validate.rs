//! Input validation helpers.
//!
//! Every operation takes a strongly-typed input struct validated once at
//! the service boundary; these helpers produce per-field failures.

use chrono::NaiveDate;

use crate::error::{MediraError, MediraResult};

/// Require a non-blank string field.
pub fn require(field: &str, value: &str) -> MediraResult<()> {
    if value.trim().is_empty() {
        Err(MediraError::validation(field, "must not be empty"))
    } else {
        Ok(())
    }
}

/// Require a plausibly shaped email address.
///
/// Deliberately shallow: deliverability is the presentation layer's
/// problem, this only rejects obviously malformed input.
pub fn require_email(field: &str, value: &str) -> MediraResult<()> {
    require(field, value)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(MediraError::validation(field, "not a valid email address"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(MediraError::validation(field, "not a valid email address"));
    }
    Ok(())
}

/// Parse an ISO `YYYY-MM-DD` date, mapping failure to a validation
/// error on the named field.
pub fn parse_date(field: &str, raw: &str) -> MediraResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| MediraError::validation(field, format!("unparsable date: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_field_is_rejected() {
        assert!(require("name", "General").is_ok());
        assert!(matches!(
            require("name", "   "),
            Err(MediraError::Validation { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(require_email("email", "admin@general.example").is_ok());
        for bad in ["", "admin", "@general.example", "admin@", "admin@nodot"] {
            assert!(require_email("email", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn dates_parse_or_fail_with_field() {
        let date = parse_date("date_of_birth", "1984-06-02").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1984, 6, 2).unwrap());

        match parse_date("date_of_birth", "02/06/1984") {
            Err(MediraError::Validation { field, .. }) => {
                assert_eq!(field, "date_of_birth");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
