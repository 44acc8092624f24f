use axum::{
    extract::State,
    http::StatusCode,
};

use crate::types::{internal_error, AppState};

/// Liveness probe. With a Postgres pool configured it also round-trips a
/// query through a pooled connection.
pub async fn health(
    State(state): State<AppState>,
) -> Result<&'static str, (StatusCode, String)> {
    let Some(pool) = state.pool.as_ref() else {
        return Ok("ok");
    };

    let conn = pool.get().await.map_err(internal_error)?;

    let row = conn
        .query_one("select 1 + 1", &[])
        .await
        .map_err(internal_error)?;

    let two: i32 = row.try_get(0).map_err(internal_error)?;
    if two != 2 {
        return Err((StatusCode::SERVICE_UNAVAILABLE, format!("unexpected probe result {two}")));
    }
    Ok("ok")
}
