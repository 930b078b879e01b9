use crate::utils::error::{LibraryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_key_length(field_name: &str, key: &str, expected: usize) -> Result<()> {
    if key.len() != expected {
        // Never echo the key itself.
        return Err(LibraryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("<{} bytes>", key.len()),
            reason: format!("Key must be exactly {} bytes", expected),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::InvalidInputError {
            field: field_name.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses a book or member id typed by a user.
pub fn parse_id(field_name: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let id: u32 = trimmed.parse().map_err(|_| LibraryError::InvalidInputError {
        field: field_name.to_string(),
        reason: format!("'{}' is not a whole number", trimmed),
    })?;

    if id == 0 {
        return Err(LibraryError::InvalidInputError {
            field: field_name.to_string(),
            reason: "Ids start at 1".to_string(),
        });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_dir", "./data").is_ok());
        assert!(validate_path("storage.data_dir", "").is_err());
        assert!(validate_path("storage.data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_key_length() {
        assert!(validate_key_length("encryption.key", "1234567812345678", 16).is_ok());
        assert!(validate_key_length("encryption.key", "short", 16).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("book_id", " 42 ").unwrap(), 42);
        assert!(parse_id("book_id", "abc").is_err());
        assert!(parse_id("book_id", "-1").is_err());
        assert!(parse_id("book_id", "0").is_err());
        assert!(parse_id("book_id", "99999999999").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("title", "Dune").is_ok());
        assert!(validate_non_empty_string("title", "   ").is_err());
    }
}
