//! User-facing error messages
//!
//! Every failure is caught where the call is made and turned into banner
//! text here. The server's `detail` wins; otherwise the per-action fallback.

use validator::ValidationErrors;
use visitor_client::ClientError;

/// Banner text for a failed API call
pub fn describe_error(err: &ClientError, fallback: &str) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None => fallback.to_string(),
    }
}

/// Banner text for a form that failed client-side validation
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    if messages.is_empty() {
        "Invalid input".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CustomerInput, StaffInput};
    use validator::Validate;

    #[test]
    fn test_detail_preferred_over_fallback() {
        let err = ClientError::Api {
            status: 400,
            detail: Some("name required".into()),
        };
        assert_eq!(describe_error(&err, "Failed to save staff"), "name required");

        let err = ClientError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(
            describe_error(&err, "Failed to save staff"),
            "Failed to save staff"
        );

        let err = ClientError::InvalidResponse("truncated".into());
        assert_eq!(
            describe_error(&err, "Failed to load customers"),
            "Failed to load customers"
        );
    }

    #[test]
    fn test_validation_messages_are_sorted_by_field() {
        let input = CustomerInput {
            name: Some("x".repeat(101)),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Invalid email format; Name must be at most 100 characters"
        );

        let errors = StaffInput::default().validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Name is required");
    }
}
