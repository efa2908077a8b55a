use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use coursedesk_core::AppError;
use coursedesk_models::Normalize;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::validation(anyhow!("{} is required", field));
    }

    if let JsonRejection::JsonDataError(_) = rejection {
        // Data errors are reported as "<field>: <reason>".
        let field = error_msg
            .strip_prefix(DATA_ERROR_PREFIX)
            .and_then(|rest| rest.split_once(": "))
            .map(|(field, _)| field)
            .filter(|field| !field.is_empty() && *field != ".");
        return match field {
            Some(field) => AppError::validation(anyhow!("Invalid value for {}", field)),
            None => AppError::validation(anyhow!("Invalid field type in request")),
        };
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body extractor that normalizes, then validates, the payload.
///
/// Every failure, from a malformed body to a broken rule, is a 400 carrying
/// a readable message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.normalize();
        value
            .validate()
            .map_err(|errors| AppError::validation(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// Path parameter extractor whose rejection uses the error envelope.
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid ID. Expected a positive integer.")))?;
        Ok(PathId(value))
    }
}
