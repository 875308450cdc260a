//! Input validation utilities

use validator::ValidationError;

use crate::constants;

/// Validate a list of workshop tags
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() as u64 > constants::MAX_WORKSHOP_TAGS {
        return Err(ValidationError::new("too_many_tags"));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidationError::new("empty_tag"));
    }
    Ok(())
}

/// Validate source code size against `max_bytes`
pub fn validate_source_code(code: &str, max_bytes: usize) -> Result<(), &'static str> {
    if code.len() > max_bytes {
        return Err("Source code exceeds the maximum allowed size");
    }
    Ok(())
}

/// Canonical form of an email address: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&["rust".into(), "web".into()]).is_ok());
        assert!(validate_tags(&[" ".into()]).is_err());
        let many: Vec<String> = (0..40).map(|i| format!("tag{}", i)).collect();
        assert!(validate_tags(&many).is_err());
    }

    #[test]
    fn test_validate_source_code() {
        assert!(validate_source_code("", 10).is_ok());
        assert!(validate_source_code("print(1);", 10).is_ok());
        assert!(validate_source_code("print(1234);", 10).is_err());
    }

    #[test]
    fn test_normalize_and_sanitize() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
        assert_eq!(sanitize_string("  hello\u{0007} world \n"), "hello world");
    }
}
