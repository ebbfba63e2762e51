use email_address::EmailAddress;
use nutype::nutype;
use serde_json::Value;
use thiserror::Error;

/// A contact form submission that has passed all schema constraints.
///
/// Request-scoped and never persisted; constructed from untrusted input via
/// [`ContactSubmission::from_value`] and consumed by the send operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub full_name: ContactFullName,
    pub email: EmailAddress,
    pub message: ContactMessageBody,
}

#[nutype(
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFullName(String);

#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageBody(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    FullName,
    Email,
    Message,
}

impl SubmissionField {
    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn violation_message(self) -> &'static str {
        match self {
            Self::FullName => "Full name is invalid!",
            Self::Email => "Email is invalid!",
            Self::Message => "Message is too short!",
        }
    }
}

/// Why a raw submission was rejected.
///
/// `Violations` lists every failing field in schema order; the rendered
/// message is the aggregate of the per-field messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionRejection {
    #[error("Expected a JSON object.")]
    NotAnObject,
    #[error("{}", violations_message(.0))]
    Violations(Vec<SubmissionField>),
}

fn violations_message(fields: &[SubmissionField]) -> String {
    fields
        .iter()
        .map(|field| field.violation_message())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ContactSubmission {
    /// Validate a parsed JSON value against the submission schema.
    ///
    /// All-or-nothing: every field must satisfy its constraint for the
    /// submission to be accepted. A missing field, a non-string value and a
    /// constraint failure are all reported as a violation of that field.
    pub fn from_value(value: &Value) -> Result<Self, SubmissionRejection> {
        let object = value.as_object().ok_or(SubmissionRejection::NotAnObject)?;

        let full_name = object
            .get(SubmissionField::FullName.key())
            .and_then(Value::as_str)
            .and_then(|raw| ContactFullName::try_new(raw.to_owned()).ok());
        let email = object
            .get(SubmissionField::Email.key())
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<EmailAddress>().ok());
        let message = object
            .get(SubmissionField::Message.key())
            .and_then(Value::as_str)
            .and_then(|raw| ContactMessageBody::try_new(raw.to_owned()).ok());

        match (full_name, email, message) {
            (Some(full_name), Some(email), Some(message)) => Ok(Self {
                full_name,
                email,
                message,
            }),
            (full_name, email, message) => {
                let mut violations = Vec::new();
                if full_name.is_none() {
                    violations.push(SubmissionField::FullName);
                }
                if email.is_none() {
                    violations.push(SubmissionField::Email);
                }
                if message.is_none() {
                    violations.push(SubmissionField::Message);
                }
                Err(SubmissionRejection::Violations(violations))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn valid_submission() {
        let value = json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": "Hello, I would like to connect.",
        });

        let submission = ContactSubmission::from_value(&value).unwrap();

        assert_eq!(*submission.full_name, "Jane Doe");
        assert_eq!(submission.email.as_str(), "jane@example.com");
        assert_eq!(*submission.message, "Hello, I would like to connect.");
    }

    #[test]
    fn not_an_object() {
        for value in [json!([]), json!("hi"), json!(42), json!(null)] {
            let result = ContactSubmission::from_value(&value);
            assert_eq!(result, Err(SubmissionRejection::NotAnObject));
        }
    }

    #[test]
    fn missing_fields() {
        let result = ContactSubmission::from_value(&json!({}));

        assert_eq!(
            result,
            Err(SubmissionRejection::Violations(vec![
                SubmissionField::FullName,
                SubmissionField::Email,
                SubmissionField::Message,
            ]))
        );
    }

    #[test]
    fn full_name_too_short() {
        let value = json!({
            "fullName": "J",
            "email": "jane@example.com",
            "message": "Hello, I would like to connect.",
        });

        let result = ContactSubmission::from_value(&value);

        assert_eq!(
            result,
            Err(SubmissionRejection::Violations(vec![
                SubmissionField::FullName
            ]))
        );
    }

    #[test]
    fn email_syntax_rejected() {
        for email in ["", "jane", "jane@", "@example.com", "jane example.com"] {
            let value = json!({
                "fullName": "Jane Doe",
                "email": email,
                "message": "Hello, I would like to connect.",
            });

            let result = ContactSubmission::from_value(&value);

            assert_eq!(
                result,
                Err(SubmissionRejection::Violations(vec![SubmissionField::Email])),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn message_too_short() {
        let value = json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": "Hi!",
        });

        let result = ContactSubmission::from_value(&value);

        assert_eq!(
            result,
            Err(SubmissionRejection::Violations(vec![
                SubmissionField::Message
            ]))
        );
    }

    #[test]
    fn wrong_types_are_field_violations() {
        let value = json!({
            "fullName": 42,
            "email": true,
            "message": ["Hello, I would like to connect."],
        });

        let result = ContactSubmission::from_value(&value);

        assert_eq!(
            result,
            Err(SubmissionRejection::Violations(vec![
                SubmissionField::FullName,
                SubmissionField::Email,
                SubmissionField::Message,
            ]))
        );
    }

    #[test]
    fn rejection_message_aggregates_violations() {
        let rejection = SubmissionRejection::Violations(vec![
            SubmissionField::FullName,
            SubmissionField::Message,
        ]);

        assert_eq!(
            rejection.to_string(),
            "Full name is invalid! Message is too short!"
        );
    }
}
