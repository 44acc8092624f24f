use axum::{
    extract::{State, Request},
    middleware::Next,
    response::IntoResponse
};

use crate::{
    AppState,
    modules::auth::store::TokenIdentityStore,
    modules::auth::types::{AuthError, Identity},
};

pub const AUTHENTICATION_HEADER: &str = "Authentication";

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authentication` header value.
///
/// A value without the `Bearer ` prefix is malformed; a prefix followed by
/// nothing but whitespace carries no credential at all.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }
    Ok(token)
}

/// Resolves the caller behind an optional `Authentication` header value.
pub async fn authenticate(
    header: Option<&str>,
    tokens: &dyn TokenIdentityStore,
) -> Result<Identity, AuthError> {
    let token = bearer_token(header.unwrap_or_default())?;

    tokens
        .lookup(token)
        .await?
        .ok_or(AuthError::Unauthenticated)
}

pub async fn auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let header = req
        .headers()
        .get(AUTHENTICATION_HEADER)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| AuthError::MalformedHeader)?;

    let identity = authenticate(header, state.tokens.as_ref())
        .await
        .inspect_err(|err| tracing::debug!(%err, "rejected notes request"))?;

    tracing::debug!(%identity, "authenticated");
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
