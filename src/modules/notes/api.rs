use std::collections::HashMap;

use axum::{
    debug_handler,
    Extension,
    extract::State,
    http::StatusCode,
    Json
};

use crate::middleware::auth::{authenticate, AUTHENTICATION_HEADER};
use crate::modules::auth::types::{AuthError, Identity};
use crate::modules::common::{SortOrder, StoreError};
use crate::modules::notes::types::*;
use crate::types::{internal_error, AppState, NOTES_LIMIT};

/// Authenticates the caller from a raw header mapping and returns their
/// most recent notes.
///
/// Header lookup is exact-key. Authentication failures become body-less
/// 400/403 responses; store failures are returned as errors.
pub async fn handle(
    headers: &HashMap<String, String>,
    state: &AppState,
) -> Result<NotesResponse, StoreError> {
    let header = headers.get(AUTHENTICATION_HEADER).map(String::as_str);

    let identity = match authenticate(header, state.tokens.as_ref()).await {
        Ok(identity) => identity,
        Err(AuthError::Store(err)) => return Err(err),
        Err(err) => {
            tracing::debug!(%err, "rejected invocation");
            return Ok(NotesResponse::failure(err.status()));
        }
    };

    let notes = recent_notes(&identity, state).await?;
    Ok(NotesResponse::ok(notes))
}

async fn recent_notes(identity: &Identity, state: &AppState) -> Result<Vec<Note>, StoreError> {
    state
        .notes
        .query_by_owner(identity, NOTES_LIMIT, SortOrder::Descending)
        .await
}

#[debug_handler]
pub async fn get_notes(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<NotesResponse, (StatusCode, String)> {
    let notes = recent_notes(&identity, &state).await.map_err(internal_error)?;

    tracing::debug!(%identity, count = notes.len(), "returning notes");
    Ok(NotesResponse::ok(notes))
}

pub async fn invoke(
    State(state): State<AppState>,
    Json(event): Json<InvokeEvent>,
) -> Result<Json<ResponseEnvelope>, (StatusCode, String)> {
    let headers = event.headers.unwrap_or_default();

    let response = handle(&headers, &state).await.map_err(internal_error)?;
    let envelope = response.into_envelope().map_err(internal_error)?;

    Ok(Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{failing_state, seeded_state, ALICE, ALICE_TOKEN, BOB_TOKEN};

    fn headers(key: &str, value: &str) -> HashMap<String, String> {
        HashMap::from([(key.to_string(), value.to_string())])
    }

    #[tokio::test]
    async fn missing_header_is_bad_request() {
        let response = handle(&HashMap::new(), &seeded_state()).await.unwrap();

        assert_eq!(response, NotesResponse::failure(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn header_key_is_matched_exactly() {
        let headers = headers("authentication", &format!("Bearer {ALICE_TOKEN}"));

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_scheme_is_bad_request() {
        let headers = headers("Authentication", ALICE_TOKEN);

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn unknown_token_is_forbidden() {
        let headers = headers("Authentication", "Bearer nope");

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response, NotesResponse::failure(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn blank_token_is_forbidden() {
        let headers = headers("Authentication", "Bearer    ");

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn known_token_without_notes_is_empty_success() {
        let headers = headers("Authentication", &format!("Bearer {BOB_TOKEN}"));

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response, NotesResponse::ok(vec![]));
    }

    #[tokio::test]
    async fn returns_ten_most_recent_notes_newest_first() {
        let headers = headers("Authentication", &format!("Bearer  {ALICE_TOKEN} "));

        let response = handle(&headers, &seeded_state()).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        let notes = response.body.unwrap();
        assert_eq!(notes.len(), 10);
        assert!(notes.iter().all(|note| note.user == ALICE));
        assert_eq!(
            notes.iter().map(|note| note.id).collect::<Vec<_>>(),
            (6..=15).rev().collect::<Vec<_>>()
        );
        assert!(notes.windows(2).all(|pair| pair[0].create_date > pair[1].create_date));
    }

    #[tokio::test]
    async fn store_failure_is_not_an_auth_failure() {
        let headers = headers("Authentication", &format!("Bearer {ALICE_TOKEN}"));

        let result = handle(&headers, &failing_state()).await;

        assert!(matches!(result, Err(StoreError::Poisoned)));
    }
}
