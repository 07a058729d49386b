use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::estimate::fields::{group_fields, FieldGroup, FieldKind, FieldSnapshot};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    Unchecked,
    MalformedEmail,
}

impl InvalidReason {
    /// Short hint shown next to the flagged control.
    pub fn hint(self) -> &'static str {
        match self {
            InvalidReason::Empty => "This field is required.",
            InvalidReason::Unchecked => "Please check this box to continue.",
            InvalidReason::MalformedEmail => "Please enter a valid email address.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidField {
    pub name: String,
    pub reason: InvalidReason,
}

/// One or more controls failed their required/format checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{} field(s) need attention", .fields.len())]
pub struct ValidationError {
    pub fields: Vec<InvalidField>,
}

impl ValidationError {
    /// The control that should be scrolled into view.
    pub fn first(&self) -> Option<&InvalidField> {
        self.fields.first()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value.trim())
}

fn check_group(group: &FieldGroup<'_>) -> Option<InvalidReason> {
    let required = group.is_required();
    match group {
        FieldGroup::Flag(field) if required && !field.checked => Some(InvalidReason::Unchecked),
        FieldGroup::Multi(_) | FieldGroup::Exclusive(_)
            if required && group.checked_values().is_empty() =>
        {
            Some(InvalidReason::Empty)
        }
        FieldGroup::Files(members) if required && members.iter().all(|f| f.file_count == 0) => {
            Some(InvalidReason::Empty)
        }
        FieldGroup::Single(field) => {
            if required && field.is_blank() {
                Some(InvalidReason::Empty)
            } else if field.kind == FieldKind::Email
                && !field.value.trim().is_empty()
                && !is_valid_email(&field.value)
            {
                // Optional email fields are still format-checked once filled in.
                Some(InvalidReason::MalformedEmail)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Checks every control and reports all failures, in document order.
pub fn check(fields: &[FieldSnapshot]) -> Result<(), ValidationError> {
    let invalid: Vec<InvalidField> = group_fields(fields)
        .iter()
        .filter_map(|group| {
            check_group(group).map(|reason| InvalidField {
                name: group.name().to_string(),
                reason,
            })
        })
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields: invalid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> Vec<FieldSnapshot> {
        vec![
            FieldSnapshot::text("name", "Kim").required(),
            FieldSnapshot::email("email", "kim@x.com").required(),
            FieldSnapshot::new("phone", FieldKind::Tel, "010-1234-5678").required(),
            FieldSnapshot::checkbox("privacyAgree", "on", true).required(),
        ]
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("kim@x.com"));
        assert!(is_valid_email(" kim.lee+quote@studio.co.kr "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("kim@x"));
        assert!(!is_valid_email("kim @x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("kim@@x.com"));
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(check(&valid_form()), Ok(()));
    }

    #[test]
    fn test_every_empty_required_field_is_reported() {
        let fields = vec![
            FieldSnapshot::text("name", "").required(),
            FieldSnapshot::email("email", "").required(),
            FieldSnapshot::text("company", ""),
            FieldSnapshot::checkbox("privacyAgree", "on", false).required(),
        ];

        let err = check(&fields).unwrap_err();
        assert_eq!(
            err.fields,
            vec![
                InvalidField { name: "name".into(), reason: InvalidReason::Empty },
                InvalidField { name: "email".into(), reason: InvalidReason::Empty },
                InvalidField { name: "privacyAgree".into(), reason: InvalidReason::Unchecked },
            ]
        );
        assert_eq!(err.first().map(|f| f.name.as_str()), Some("name"));
        assert!(!err.contains("company"));
        assert_eq!(err.to_string(), "3 field(s) need attention");
    }

    #[test]
    fn test_malformed_email_blocks_even_when_optional() {
        let mut fields = valid_form();
        fields.push(FieldSnapshot::email("cc-email", "nope"));
        let err = check(&fields).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].reason, InvalidReason::MalformedEmail);
        assert_eq!(err.fields[0].name, "cc-email");
    }

    #[test]
    fn test_required_radio_group_reported_once() {
        let fields = vec![
            FieldSnapshot::radio("timeline", "1 month", false).required(),
            FieldSnapshot::radio("timeline", "3 months", false).required(),
        ];
        let err = check(&fields).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].reason, InvalidReason::Empty);
    }

    #[test]
    fn test_required_attachment() {
        let fields = vec![FieldSnapshot::file("attachments", 0).required()];
        assert!(check(&fields).is_err());
        let fields = vec![FieldSnapshot::file("attachments", 1).required()];
        assert!(check(&fields).is_ok());
    }
}
