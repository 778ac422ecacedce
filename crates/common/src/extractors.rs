//! Custom axum extractors for Chatbridge

use axum::{
    extract::{rejection::FormRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// URL-encoded form extractor that validates the deserialized value automatically.
///
/// Replaces `Form<T>` + manual `.validate()` calls in handlers. The browser chat
/// page posts `message` as a form field.
///
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

/// Rejection type for `ValidatedForm`:
/// - body deserialization errors → 400 (via `Error::Validation`)
/// - validation errors → 400 (via `Error::Validation`)
#[derive(Debug)]
pub enum ValidatedRejection {
    Form(FormRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedRejection::Form(e) => Error::Validation(e.body_text()).into_response(),
            ValidatedRejection::Validation(e) => e.into_response(),
        }
    }
}

fn validate<T: Validate>(value: &T) -> Result<(), ValidatedRejection> {
    value.validate().map_err(|e| {
        ValidatedRejection::Validation(Error::Validation(format!("Validation failed: {}", e)))
    })
}

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidatedRejection::Form)?;
        validate(&value)?;
        Ok(ValidatedForm(value))
    }
}
