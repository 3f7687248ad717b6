use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson, Response},
};
use thiserror::Error;

/// The only failure a user can cause: a submission that is missing or
/// misformats a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all fields before submitting.")]
    MissingFields { fields: Vec<String> },
    #[error("Unknown food type '{0}'. Choose Vegetarian, Non-Vegetarian or Both.")]
    UnknownFoodType(String),
    #[error("Expiry date '{0}' is not a valid YYYY-MM-DD date.")]
    InvalidExpiry(String),
}

impl ValidationError {
    /// Field names the error refers to, for highlighting and API bodies.
    pub fn fields(&self) -> Vec<String> {
        match self {
            ValidationError::MissingFields { fields } => fields.clone(),
            ValidationError::UnknownFoodType(_) => vec!["food_type".to_string()],
            ValidationError::InvalidExpiry(_) => vec!["expiry".to_string()],
        }
    }

    pub(crate) fn from_validator(errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        ValidationError::MissingFields { fields }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Payload(#[from] JsonRejection),
    #[error("session context unavailable")]
    SessionUnavailable,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                AxumJson(serde_json::json!({
                    "error": err.to_string(),
                    "fields": err.fields(),
                })),
            )
                .into_response(),
            AppError::Payload(rejection) => {
                tracing::warn!("Rejected JSON payload: {}", rejection.body_text());
                (
                    rejection.status(),
                    AxumJson(serde_json::json!({
                        "error": rejection.body_text(),
                        "fields": Vec::<String>::new(),
                    })),
                )
                    .into_response()
            }
            AppError::SessionUnavailable => {
                tracing::error!("Session middleware did not attach a session");
                (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_matches_banner_text() {
        let err = ValidationError::MissingFields { fields: vec!["contact".into()] };
        assert_eq!(err.to_string(), "Please fill out all fields before submitting.");
        assert_eq!(err.fields(), vec!["contact".to_string()]);
    }

    #[test]
    fn validation_maps_to_unprocessable_entity() {
        let resp = AppError::from(ValidationError::InvalidExpiry("tomorrow".into())).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn session_unavailable_is_internal_error() {
        let resp = AppError::SessionUnavailable.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
