use axum::body::Bytes;
use axum::extract::State;
use axum::{debug_handler, Json};

use crate::api::errors::ShardError;
use crate::api::types::{ShardRequest, ShardResponse};
use crate::request_handler::process_request;
use crate::router;

/// Shard computation endpoint.
/// Only supports a specific shape of data, and rejects any malformed body.
#[debug_handler]
pub async fn shards(
    State(state): State<router::State>,
    body: Bytes,
) -> Result<Json<ShardResponse>, ShardError> {
    let request = ShardRequest::from_bytes(&body)?;
    let response = process_request(state.jamf_client.as_ref(), request).await?;
    Ok(Json(response))
}
