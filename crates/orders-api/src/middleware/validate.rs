use crate::domain::requests::RequiredFields;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::errors::HttpError;
use validator::{Validate, ValidationErrors};

/// JSON body extractor that reports, in order: an absent or empty payload, the first
/// missing required key, a type mismatch, then field rule violations.
pub struct ValidatedPayload<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedPayload<T>
where
    T: DeserializeOwned + Validate + RequiredFields + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        let payload = parse_payload::<T>(&bytes)?;

        payload
            .validate()
            .map_err(|errors| HttpError::BadRequest(format_validation_errors(&errors)))?;

        Ok(Self(payload))
    }
}

pub fn parse_payload<T>(bytes: &[u8]) -> Result<T, HttpError>
where
    T: DeserializeOwned + RequiredFields,
{
    let no_data = || HttpError::BadRequest("No data provided!".to_string());

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(no_data());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| HttpError::BadRequest(format!("Invalid data: {e}")))?;

    let object = match &value {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(no_data()),
    };

    if let Some(field) = T::REQUIRED.iter().find(|f| !object.contains_key(**f)) {
        return Err(HttpError::BadRequest(format!(
            "Missing {field} field in the data provided!"
        )));
    }

    serde_json::from_value(value).map_err(|e| HttpError::BadRequest(format!("Invalid data: {e}")))
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut error_messages = Vec::new();

    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "email" => "Invalid email format".to_string(),
                    "length" => "Invalid length".to_string(),
                    "range" => "Value out of range".to_string(),
                    _ => format!("Invalid {field}"),
                });
            error_messages.push(format!("{field}: {message}"));
        }
    }

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{CreateCustomerRequest, CreateOrderRequest};

    fn message(err: HttpError) -> String {
        err.message().to_string()
    }

    #[test]
    fn empty_bodies_are_no_data() {
        for body in ["", "   ", "{}", "[]", "null", "\"text\""] {
            let err = parse_payload::<CreateCustomerRequest>(body.as_bytes()).unwrap_err();
            assert_eq!(message(err), "No data provided!", "body: {body:?}");
        }
    }

    #[test]
    fn first_missing_field_is_reported() {
        let err = parse_payload::<CreateCustomerRequest>(br#"{"contact":"+254700000001"}"#)
            .unwrap_err();
        assert_eq!(message(err), "Missing name field in the data provided!");

        let err =
            parse_payload::<CreateOrderRequest>(br#"{"customer_id":1,"item":"Rice"}"#).unwrap_err();
        assert_eq!(message(err), "Missing amount field in the data provided!");
    }

    #[test]
    fn wrong_types_are_invalid_data() {
        let err = parse_payload::<CreateOrderRequest>(
            br#"{"customer_id":"one","item":"Rice","amount":"10"}"#,
        )
        .unwrap_err();
        assert!(message(err).starts_with("Invalid data:"));

        let err = parse_payload::<CreateOrderRequest>(b"{not json").unwrap_err();
        assert!(message(err).starts_with("Invalid data:"));
    }

    #[test]
    fn field_rules_are_joined() {
        let req = parse_payload::<CreateCustomerRequest>(
            br#"{"name":"","email":"nope","contact":"+254700000001"}"#,
        )
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "email: Email must be a valid address; name: Name must be between 1 and 255 characters"
        );
    }
}
