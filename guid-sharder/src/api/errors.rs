use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use common_jamf::JamfError;

#[derive(Error, Debug)]
pub enum ShardError {
    #[error("failed to decode request: {0}")]
    RequestDecodingError(String),

    #[error("group_id is required when source_type is {0}")]
    MissingGroupId(&'static str),

    #[error("group_id must be a numeric ID, got {0:?}")]
    InvalidGroupId(String),

    #[error("{0:?} is not a numeric ID")]
    InvalidId(String),

    #[error("exactly one of shard_count, shard_percentages or shard_sizes must be set")]
    ShardLayoutConflict,

    #[error("strategy {strategy} requires {required}")]
    MissingStrategyParams {
        strategy: &'static str,
        required: &'static str,
    },

    #[error("{0} must not be empty")]
    EmptyShardLayout(&'static str),

    #[error("shard_count must be at least 1, got {0}")]
    InvalidShardCount(i64),

    #[error("shard_percentages entries must be non-negative, got {0}")]
    NegativePercentage(i64),

    #[error("shard_percentages must sum to exactly 100, got {0}")]
    PercentageSum(i64),

    #[error("shard_sizes entries must be at least 1, or -1 in the last position, got {0}")]
    InvalidShardSize(i64),

    #[error("reserved_ids key {0:?} does not match shard_<index>")]
    InvalidShardName(String),

    #[error("reserved_ids key {name:?} is out of range for {shard_count} shards")]
    ShardNameOutOfRange { name: String, shard_count: usize },

    #[error("{0:?} is listed in both exclude_ids and reserved_ids")]
    ReservedAndExcluded(String),

    #[error("{0:?} is reserved to more than one shard")]
    DuplicateReservation(String),

    #[error("{context} failed: {source}")]
    UpstreamError {
        context: &'static str,
        source: JamfError,
    },
}

impl IntoResponse for ShardError {
    fn into_response(self) -> Response {
        match self {
            ShardError::RequestDecodingError(_)
            | ShardError::MissingGroupId(_)
            | ShardError::InvalidGroupId(_)
            | ShardError::InvalidId(_)
            | ShardError::ShardLayoutConflict
            | ShardError::MissingStrategyParams { .. }
            | ShardError::EmptyShardLayout(_)
            | ShardError::InvalidShardCount(_)
            | ShardError::NegativePercentage(_)
            | ShardError::PercentageSum(_)
            | ShardError::InvalidShardSize(_)
            | ShardError::InvalidShardName(_)
            | ShardError::ShardNameOutOfRange { .. }
            | ShardError::ReservedAndExcluded(_)
            | ShardError::DuplicateReservation(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            ShardError::UpstreamError { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
        }
        .into_response()
    }
}
