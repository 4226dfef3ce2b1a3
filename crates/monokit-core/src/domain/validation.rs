//! Identifier validation.
//!
//! App names double as directory names and manifest script suffixes, so they
//! are restricted to `^[a-z][a-z0-9-]*$`. The check is pure: collisions with
//! existing app directories are detected by the caller.

use crate::domain::error::DomainError;

/// Validate a candidate app name.
///
/// Accepts iff the name starts with a lowercase ASCII letter and every other
/// character is a lowercase ASCII letter, a digit or `-`.
pub fn validate_app_name(name: &str) -> Result<(), DomainError> {
    let reject = |reason: String| DomainError::InvalidAppName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(reject("name cannot be empty".into())),
        Some(c) if !c.is_ascii_lowercase() => {
            return Err(reject(format!(
                "must start with a lowercase letter, found '{c}'"
            )));
        }
        Some(_) => {}
    }

    for (idx, c) in chars.enumerate() {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return Err(reject(format!(
                "invalid character '{c}' at position {}; use lowercase letters, digits and hyphens",
                idx + 1
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kebab_case_names() {
        for name in ["a", "api", "billing-service", "web2", "x-1-y", "a-", "a--b"] {
            assert!(validate_app_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_name() {
        let err = validate_app_name("").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn rejects_leading_non_letter() {
        for name in ["1api", "-api", "Api", "_api", ".api"] {
            let err = validate_app_name(name).unwrap_err();
            assert!(
                err.to_string().contains("must start with a lowercase letter"),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn rejects_invalid_characters_with_position() {
        let err = validate_app_name("my_app").unwrap_err();
        assert!(err.to_string().contains("'_' at position 2"));

        assert!(validate_app_name("myApp").is_err());
        assert!(validate_app_name("my app").is_err());
        assert!(validate_app_name("my/app").is_err());
        assert!(validate_app_name("café").is_err());
    }

    #[test]
    fn error_carries_original_name() {
        match validate_app_name("Bad") {
            Err(DomainError::InvalidAppName { name, .. }) => assert_eq!(name, "Bad"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
