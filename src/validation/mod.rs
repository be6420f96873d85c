//! Name, value and format-metadata validation.
//!
//! These are pure predicates over candidate strings. Every mutating
//! operation in [`crate::tree`] and [`crate::document`] runs the relevant
//! validator before it touches any state, so a rejected input never leaves a
//! half-applied change behind.
//!
//! # Character rules
//!
//! - A **name** is non-blank and consists only of Unicode letters (general
//!   category `L`), ASCII digits, spaces, `.` and `,`.
//! - A **value** (attribute value or text content) follows the same rule and
//!   additionally permits `%`.
//!
//! ```
//! use xmlarbor::validation::{is_valid_name, is_valid_value};
//!
//! assert!(is_valid_name("Programação Avançada"));
//! assert!(!is_valid_name("na#ds"));
//! assert!(is_valid_value("20%"));
//! assert!(!is_valid_name("20%"));
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConfigError, NameRole, XmlError};

/// The encodings a [`Document`](crate::Document) may declare.
pub const ENCODINGS: [&str; 4] = ["UTF-8", "UTF-16", "ISO-8859-1", "US-ASCII"];

#[allow(clippy::expect_used)]
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\p{L}0-9 .,]+$").expect("name pattern is a valid regex"))
}

#[allow(clippy::expect_used)]
fn value_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\p{L}0-9 .,%]+$").expect("value pattern is a valid regex"))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Returns `true` if `s` is acceptable as an entity or attribute name.
#[must_use]
pub fn is_valid_name(s: &str) -> bool {
    !is_blank(s) && name_pattern().is_match(s)
}

/// Returns `true` if `s` is acceptable as an attribute value or text content.
#[must_use]
pub fn is_valid_value(s: &str) -> bool {
    !is_blank(s) && value_pattern().is_match(s)
}

/// Checks an entity or attribute name.
///
/// # Errors
///
/// Returns [`XmlError::InvalidName`] if `name` is blank or contains a
/// character outside the name set.
pub fn validate_name(name: &str) -> Result<(), XmlError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(XmlError::invalid(NameRole::Name, name))
    }
}

/// Checks an attribute value or text content.
///
/// # Errors
///
/// Returns [`XmlError::InvalidName`] if `value` is blank or contains a
/// character outside the value set.
pub fn validate_value(value: &str) -> Result<(), XmlError> {
    if is_valid_value(value) {
        Ok(())
    } else {
        Err(XmlError::invalid(NameRole::Value, value))
    }
}

#[allow(clippy::expect_used)]
fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("version pattern is a valid regex"))
}

/// Checks a document version such as `"1.0"`.
///
/// # Errors
///
/// Returns [`XmlError::Configuration`] unless `version` is two runs of
/// ASCII digits joined by a dot.
pub fn validate_version(version: &str) -> Result<(), XmlError> {
    if version_pattern().is_match(version) {
        Ok(())
    } else {
        Err(ConfigError::Version(version.to_string()).into())
    }
}

/// Checks a document encoding label against [`ENCODINGS`].
///
/// Matching is exact and case-sensitive.
///
/// # Errors
///
/// Returns [`XmlError::Configuration`] for any other label.
pub fn validate_encoding(encoding: &str) -> Result<(), XmlError> {
    if ENCODINGS.contains(&encoding) {
        Ok(())
    } else {
        Err(ConfigError::Encoding(encoding.to_string()).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["plano", "fuc", "M4310", "Mestrado em Engenharia Informática", "6.0", "a,b"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "   ", "\t", "na#ds", "!djf", "a/b", "a-b", "<x>", "20%"] {
            let err = validate_name(name).unwrap_err();
            assert_eq!(
                err,
                XmlError::InvalidName {
                    role: NameRole::Name,
                    input: name.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_letter_like_characters_rejected() {
        // Letter numbers (Nl) and combining marks (Mn) are not letters.
        for input in ["Ⅻ", "a\u{345}", "x\u{301}", "٣", "²"] {
            assert!(!is_valid_name(input), "{input:?} should be rejected");
            assert!(!is_valid_value(input), "{input:?} should be rejected");
        }
        for input in ["ß", "Ωmega", "日本", "Ǆ"] {
            assert!(is_valid_name(input), "{input:?} should be accepted");
        }
    }

    #[test]
    fn test_value_allows_percent() {
        assert!(validate_value("20%").is_ok());
        assert!(validate_value("Dissertação").is_ok());
        assert!(validate_value("").is_err());
        assert!(validate_value("!&dsjhd").is_err());
    }

    #[test]
    fn test_version() {
        assert!(validate_version("1.0").is_ok());
        assert!(validate_version("10.24").is_ok());
        for bad in ["1", "1.", ".1", "1.0.0", "v1.0", "", "1,0", " 1.0"] {
            assert!(
                matches!(
                    validate_version(bad),
                    Err(XmlError::Configuration(ConfigError::Version(_)))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_encoding() {
        for enc in ENCODINGS {
            assert!(validate_encoding(enc).is_ok());
        }
        for bad in ["utf-8", "UTF8", "UTF-32", "latin1", ""] {
            assert!(matches!(
                validate_encoding(bad),
                Err(XmlError::Configuration(ConfigError::Encoding(_)))
            ));
        }
    }
}
