use serde::Serialize;

use crate::toast::ToastKind;

pub const APPLICATION_RECEIVED_MESSAGE: &str =
    "Thanks! Your application has been received. We will reach out over email.";

pub const CHECKBOX_FIELD: &str = "scholarship";

/// Field values as read from the page. `None` means the control is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawApplicationFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub domain: Option<String>,
    pub duration: Option<String>,
    pub motivation: Option<String>,
    pub scholarship: Option<bool>,
}

impl RawApplicationFields {
    /// Reads every known field through `value_of` (by element id) and
    /// `checked_of` for the checkbox.
    pub fn collect(
        mut value_of: impl FnMut(&str) -> Option<String>,
        checked_of: impl FnOnce(&str) -> Option<bool>,
    ) -> Self {
        Self {
            name: value_of("name"),
            email: value_of("email"),
            phone: value_of("phone"),
            college: value_of("college"),
            domain: value_of("domain"),
            duration: value_of("duration"),
            motivation: value_of("motivation"),
            scholarship: checked_of(CHECKBOX_FIELD),
        }
    }
}

/// The application as it would be sent once a backend exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub domain: Option<String>,
    pub duration: Option<String>,
    pub motivation: Option<String>,
    pub scholarship: bool,
}

impl From<RawApplicationFields> for ApplicationRecord {
    fn from(raw: RawApplicationFields) -> Self {
        let trimmed = |value: Option<String>| value.map(|value| value.trim().to_string());
        Self {
            name: trimmed(raw.name),
            email: trimmed(raw.email),
            phone: trimmed(raw.phone),
            college: trimmed(raw.college),
            domain: raw.domain,
            duration: raw.duration,
            motivation: trimmed(raw.motivation),
            scholarship: raw.scholarship.unwrap_or(false),
        }
    }
}

impl ApplicationRecord {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Let the browser report validity; nothing else changes.
    ReportValidity,
    Accepted {
        record: ApplicationRecord,
        message: &'static str,
        kind: ToastKind,
    },
}

/// Decides what a submit does. Default navigation is always prevented by the
/// caller before this runs.
pub fn handle_submit(form_valid: bool, fields: RawApplicationFields) -> SubmitOutcome {
    if !form_valid {
        tracing::debug!("application form failed native validation");
        return SubmitOutcome::ReportValidity;
    }
    let record = ApplicationRecord::from(fields);
    tracing::info!(
        domain = record.domain.as_deref().unwrap_or_default(),
        scholarship = record.scholarship,
        "mock application accepted"
    );
    SubmitOutcome::Accepted {
        record,
        message: APPLICATION_RECEIVED_MESSAGE,
        kind: ToastKind::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> RawApplicationFields {
        RawApplicationFields {
            name: Some("  Ada Lovelace ".into()),
            email: Some(" ada@example.com".into()),
            phone: Some("+44 20 7946 0000 ".into()),
            college: Some("Analytical College".into()),
            domain: Some(" devops".into()),
            duration: Some("3-months".into()),
            motivation: Some("\nI like engines.\n".into()),
            scholarship: Some(true),
        }
    }

    #[test]
    fn accepted_record_trims_text_but_not_selects() {
        let SubmitOutcome::Accepted { record, message, kind } = handle_submit(true, filled())
        else {
            panic!("valid form must be accepted");
        };
        assert_eq!(record.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(record.email.as_deref(), Some("ada@example.com"));
        assert_eq!(record.phone.as_deref(), Some("+44 20 7946 0000"));
        assert_eq!(record.motivation.as_deref(), Some("I like engines."));
        assert_eq!(record.domain.as_deref(), Some(" devops"));
        assert!(record.scholarship);
        assert_eq!(message, APPLICATION_RECEIVED_MESSAGE);
        assert_eq!(kind, ToastKind::Success);
    }

    #[test]
    fn invalid_form_only_reports_validity() {
        let outcome = handle_submit(false, filled());
        assert_eq!(outcome, SubmitOutcome::ReportValidity);
    }

    #[test]
    fn missing_controls_are_tolerated() {
        let outcome = handle_submit(true, RawApplicationFields::default());
        let SubmitOutcome::Accepted { record, .. } = outcome else {
            panic!("valid form must be accepted");
        };
        assert_eq!(record, ApplicationRecord::default());
        assert_eq!(
            record.to_json(),
            r#"{"name":null,"email":null,"phone":null,"college":null,"domain":null,"duration":null,"motivation":null,"scholarship":false}"#
        );
    }

    #[test]
    fn collect_reads_fields_by_id() {
        let fields = RawApplicationFields::collect(
            |id| (id != "phone").then(|| format!("{id}-value")),
            |_| None,
        );
        assert_eq!(fields.name.as_deref(), Some("name-value"));
        assert_eq!(fields.phone, None);
        assert_eq!(fields.scholarship, None);
    }
}
