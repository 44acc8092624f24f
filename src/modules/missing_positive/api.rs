use axum::Json;

use crate::modules::missing_positive::{smallest_missing_positive, types::*};

pub async fn missing_positive(
    Json(body): Json<MissingPositivePayload>,
) -> Json<MissingPositiveReply> {
    let result = smallest_missing_positive(&body.values);

    tracing::debug!(len = body.values.len(), result, "computed smallest missing positive");
    Json(MissingPositiveReply { result })
}
