use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use memorybox_core::model::Principal;

use crate::http_error::HttpError;

/// Set by the authenticating reverse proxy in front of the server.
pub const PRINCIPAL_HEADER: &str = "x-memorybox-principal";

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequestPrincipal
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(HttpError::Unauthorized)?;
        Ok(RequestPrincipal(Principal::new(value)))
    }
}
