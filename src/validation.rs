//! Normalization and field rules for contact submissions.
//!
//! Rules run in a fixed order and stop at the first violation, so a caller only
//! ever sees one error at a time.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{AppError, Field};
use crate::models::{ContactPayload, ContactSubmission, HelpType};

pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_EMAIL_CHARS: usize = 150;
pub const MAX_PROJECT_DETAILS_CHARS: usize = 2000;

// local@domain.tld with no whitespace and a single '@'
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Shape check only; says nothing about deliverability.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Length in UTF-16 code units, the unit browsers use for form field limits.
fn char_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Strips surrounding whitespace, including the byte order mark.
fn trim_text(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Trims every field, lowercases the help type, then applies the field rules.
///
/// Order: name, email, helpType, projectDetails.
pub fn validate_submission(payload: ContactPayload) -> Result<ContactSubmission, AppError> {
    let trimmed = |value: Option<String>| {
        value
            .map(|v| trim_text(&v).to_string())
            .unwrap_or_default()
    };

    let name = trimmed(payload.name);
    let email = trimmed(payload.email);
    let help_type = trimmed(payload.help_type).to_lowercase();
    let project_details = trimmed(payload.project_details);
    let language = payload.language.map(|v| trim_text(&v).to_string());

    if name.is_empty() || char_len(&name) > MAX_NAME_CHARS {
        return Err(AppError::Validation(Field::Name));
    }

    if email.is_empty() || char_len(&email) > MAX_EMAIL_CHARS || !is_valid_email(&email) {
        return Err(AppError::Validation(Field::Email));
    }

    let help_type = HelpType::parse(&help_type).ok_or(AppError::Validation(Field::HelpType))?;

    if char_len(&project_details) > MAX_PROJECT_DETAILS_CHARS {
        return Err(AppError::Validation(Field::ProjectDetails));
    }

    Ok(ContactSubmission {
        name,
        email,
        help_type,
        project_details,
        language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, help_type: &str) -> ContactPayload {
        ContactPayload {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            help_type: Some(help_type.to_string()),
            project_details: None,
            language: None,
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user+tag@sub.example.co.uk"));
        assert!(is_valid_email("jonas.jonaitis@pastas.lt"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_normalizes_fields() {
        let mut input = payload("  Jane Doe ", " jane@x.com\n", " MarKeting ");
        input.project_details = Some("  hello  ".to_string());
        input.language = Some(" lt ".to_string());

        let submission = validate_submission(input).unwrap();
        assert_eq!(submission.name(), "Jane Doe");
        assert_eq!(submission.email(), "jane@x.com");
        assert_eq!(submission.help_type(), HelpType::Marketing);
        assert_eq!(submission.project_details(), "hello");
        assert_eq!(submission.language(), Some("lt"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let submission = validate_submission(payload("Jane", "jane@x.com", "other")).unwrap();
        assert_eq!(submission.project_details(), "");
        assert_eq!(submission.language(), None);
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(
            validate_submission(payload("   ", "a@b.com", "other")),
            Err(AppError::Validation(Field::Name))
        );
        assert_eq!(
            validate_submission(ContactPayload::default()),
            Err(AppError::Validation(Field::Name))
        );
        let at_limit = "a".repeat(MAX_NAME_CHARS);
        assert!(validate_submission(payload(&at_limit, "a@b.com", "other")).is_ok());
        let too_long = "a".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(
            validate_submission(payload(&too_long, "a@b.com", "other")),
            Err(AppError::Validation(Field::Name))
        );
    }

    #[test]
    fn test_limits_count_utf16_code_units() {
        // Each emoji is one char but two UTF-16 code units
        let at_limit = "😀".repeat(MAX_NAME_CHARS / 2);
        assert!(validate_submission(payload(&at_limit, "a@b.com", "other")).is_ok());

        let over_limit = "😀".repeat(MAX_NAME_CHARS / 2 + 1);
        assert_eq!(
            validate_submission(payload(&over_limit, "a@b.com", "other")),
            Err(AppError::Validation(Field::Name))
        );

        let mut input = payload("Jane", "jane@x.com", "other");
        input.project_details = Some("😀".repeat(MAX_PROJECT_DETAILS_CHARS / 2 + 1));
        assert_eq!(
            validate_submission(input),
            Err(AppError::Validation(Field::ProjectDetails))
        );
    }

    #[test]
    fn test_bmp_characters_count_once() {
        let name = "ž".repeat(MAX_NAME_CHARS);
        assert!(validate_submission(payload(&name, "a@b.com", "other")).is_ok());
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        assert_eq!(
            validate_submission(payload("\u{FEFF}", "a@b.com", "other")),
            Err(AppError::Validation(Field::Name))
        );

        let mut input = payload("\u{FEFF} Jane \u{FEFF}", "\u{FEFF}jane@x.com", "other");
        input.language = Some("\u{FEFF}en".to_string());
        let submission = validate_submission(input).unwrap();
        assert_eq!(submission.name(), "Jane");
        assert_eq!(submission.email(), "jane@x.com");
        assert_eq!(submission.language(), Some("en"));
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(
            validate_submission(payload("Jane", "", "other")),
            Err(AppError::Validation(Field::Email))
        );
        assert_eq!(
            validate_submission(payload("Jane", "jane", "other")),
            Err(AppError::Validation(Field::Email))
        );
        let long_local = "a".repeat(MAX_EMAIL_CHARS);
        assert_eq!(
            validate_submission(payload("Jane", &format!("{}@x.com", long_local), "other")),
            Err(AppError::Validation(Field::Email))
        );
    }

    #[test]
    fn test_email_length_boundary() {
        let domain = "@x.com";
        let at_limit = format!("{}{}", "a".repeat(MAX_EMAIL_CHARS - domain.len()), domain);
        assert_eq!(at_limit.len(), MAX_EMAIL_CHARS);
        assert!(validate_submission(payload("Jane", &at_limit, "other")).is_ok());

        let over_limit = format!("a{}", at_limit);
        assert_eq!(
            validate_submission(payload("Jane", &over_limit, "other")),
            Err(AppError::Validation(Field::Email))
        );
    }

    #[test]
    fn test_project_details_length_boundary() {
        let mut input = payload("Jane", "jane@x.com", "other");
        input.project_details = Some("x".repeat(MAX_PROJECT_DETAILS_CHARS));
        let submission = validate_submission(input).unwrap();
        assert_eq!(submission.project_details().len(), MAX_PROJECT_DETAILS_CHARS);

        let mut input = payload("Jane", "jane@x.com", "other");
        input.project_details = Some("x".repeat(MAX_PROJECT_DETAILS_CHARS + 1));
        assert_eq!(
            validate_submission(input),
            Err(AppError::Validation(Field::ProjectDetails))
        );
    }

    #[test]
    fn test_help_type_rules() {
        assert_eq!(
            validate_submission(payload("Jane", "jane@x.com", "design")),
            Err(AppError::Validation(Field::HelpType))
        );
        assert_eq!(
            validate_submission(payload("Jane", "jane@x.com", "")),
            Err(AppError::Validation(Field::HelpType))
        );
        for help in ["MARKETING", "Consulting", " research ", "other"] {
            assert!(validate_submission(payload("Jane", "jane@x.com", help)).is_ok());
        }
    }

    #[test]
    fn test_project_details_limit_applies_after_trim() {
        let mut input = payload("Jane", "jane@x.com", "other");
        input.project_details = Some(format!("  {}  ", "x".repeat(MAX_PROJECT_DETAILS_CHARS)));
        assert!(validate_submission(input).is_ok());

        let mut input = payload("Jane", "jane@x.com", "other");
        input.project_details = Some("x".repeat(MAX_PROJECT_DETAILS_CHARS + 1));
        assert_eq!(
            validate_submission(input),
            Err(AppError::Validation(Field::ProjectDetails))
        );
    }

    #[test]
    fn test_first_violation_wins() {
        assert_eq!(
            validate_submission(payload("", "not-an-email", "nope")),
            Err(AppError::Validation(Field::Name))
        );
        assert_eq!(
            validate_submission(payload("Jane", "not-an-email", "nope")),
            Err(AppError::Validation(Field::Email))
        );
    }
}
