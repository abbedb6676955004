//! Core business logic for the lost & found service.

pub mod services;

pub use services::*;

/// Generate a unique ID using ULID.
#[must_use]
pub fn generate_id() -> String {
    ulid::Ulid::new().to_string().to_lowercase()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str, field: &str) -> lostfound_common::AppResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        lostfound_common::AppError::Validation(format!("{field}: expected a YYYY-MM-DD date"))
    })
}

/// Parse a category name. Matching is exact and case-sensitive.
pub fn parse_category(value: &str) -> lostfound_common::AppResult<lostfound_db::entities::Category> {
    let value = value.trim();
    if value.is_empty() {
        return Err(lostfound_common::AppError::Validation(
            "category is required".to_string(),
        ));
    }
    value
        .parse()
        .map_err(|e: lostfound_db::entities::category::UnknownCategory| {
            lostfound_common::AppError::Validation(e.to_string())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_lowercase_ulid() {
        let id = generate_id();
        assert_eq!(id.len(), 26);
        assert_eq!(id, id.to_lowercase());
        assert_ne!(id, generate_id());
    }

    #[test]
    fn test_parse_category_is_case_sensitive() {
        assert!(parse_category("Laptop").is_ok());
        assert!(parse_category("laptop").is_err());
        assert!(parse_category("  ").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date(" 2024-11-10 ", "lostDate").unwrap();
        assert_eq!(date.to_string(), "2024-11-10");
        assert!(parse_date("10/11/2024", "lostDate").is_err());
        assert!(parse_date("", "lostDate").is_err());
    }
}
