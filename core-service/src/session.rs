//! Provider session extraction from incoming requests.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use bridge_traits::storage::ProviderUserSession;
use core_runtime::logging::redact_if_sensitive;
use tracing::debug;

use crate::error::CoreError;

/// Provider session carried by a request as `Authorization: Bearer <token>`.
///
/// Rejects with [`CoreError::MissingSession`] (401) when the header is absent
/// or not a non-empty bearer token.
#[derive(Debug)]
pub struct Session(pub ProviderUserSession);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(CoreError::MissingSession)?;

        let token = bearer_token(header).ok_or(CoreError::MissingSession)?;
        debug!(
            authorization = %redact_if_sensitive("authorization", token),
            "Provider session attached"
        );

        Ok(Session(ProviderUserSession::new(token)))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
