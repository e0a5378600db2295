//! Declarative request validation
//!
//! Routes that accept [`ValidatedJson<T>`] reject the request with a 400
//! listing field errors before the handler runs. A request without a JSON
//! content type is read as an empty object.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldError};

/// Field-level rules for a request body
pub trait ValidateRequest {
    /// Every violated rule; empty when the body is acceptable
    fn validate(&self) -> Vec<FieldError>;
}

/// JSON body that has passed its [`ValidateRequest`] rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + ValidateRequest + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(JsonRejection::MissingJsonContentType(_)) => T::default(),
            Err(rejection) => return Err(rejection.into()),
        };

        let errors = value.validate();
        if !errors.is_empty() {
            tracing::debug!(?errors, "Request rejected by route validation");
            return Err(ApiError::InvalidFields(errors));
        }

        Ok(Self(value))
    }
}
