use crate::http::error::Error;
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// A JSON request body that has passed structural validation.
///
/// Works like `Json<T>` but the handler only sees values whose declared field
/// bounds hold, which is what lets the store assume every record it's asked to
/// write is within bounds. Both deserialization failures and bound violations
/// are reported as `400 Bad Request` carrying a single message.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    B: Send + 'static,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = Error;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::Validation(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            return Err(Error::Validation(first_message(&errors)));
        }

        Ok(Self(value))
    }
}

/// Picks the single violation to report.
///
/// `ValidationErrors` hands back a map, so we sort by field name to keep the
/// choice deterministic.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    for (name, errors) in fields {
        if let Some(error) = errors.first() {
            return match &error.message {
                Some(message) => message.to_string(),
                None => format!("\"{}\" is invalid", name),
            };
        }
    }

    "invalid request body".to_string()
}
