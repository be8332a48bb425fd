use common_jamf::JamfClient;
use tracing::info;

use crate::api::errors::ShardError;
use crate::api::types::{ShardRequest, ShardResponse};
use crate::sharding::{build_shards, partition_id};
use crate::source::fetch_ids;

/// Validates a request, fetches the ID pool it names, and carves the pool
/// into shards.
pub async fn process_request(
    client: &(dyn JamfClient + Send + Sync),
    request: ShardRequest,
) -> Result<ShardResponse, ShardError> {
    let plan = request.resolve()?;

    let ids = fetch_ids(client, plan.source_type, plan.group_id.as_deref()).await?;
    info!(
        source_type = plan.source_type.as_str(),
        strategy = plan.spec.strategy.name(),
        candidates = ids.len(),
        "sharding id pool"
    );

    let id = partition_id(
        plan.source_type,
        &plan.spec.strategy,
        &plan.spec.seed,
        plan.group_id.as_deref(),
    );
    let shards = build_shards(ids, &plan.spec);

    Ok(ShardResponse { id, shards })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use common_jamf::{JamfError, MockJamfClient, UserAccount};

    use crate::api::types::{SourceType, StrategyKind};

    use super::*;

    fn user_request() -> ShardRequest {
        ShardRequest {
            source_type: SourceType::UserAccounts,
            group_id: None,
            strategy: StrategyKind::RoundRobin,
            shard_count: Some(2),
            shard_percentages: None,
            shard_sizes: None,
            seed: None,
            exclude_ids: Vec::new(),
            reserved_ids: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn test_round_robin_over_user_accounts() {
        let users = (1..=6).map(|id| UserAccount { id }).collect();
        let client = MockJamfClient::new().users_ret(Ok(users));

        let response = process_request(&client, user_request())
            .await
            .expect("request failed");

        assert_eq!(
            response.shards.get("shard_0"),
            Some(&vec!["1".to_string(), "3".to_string(), "5".to_string()])
        );
        assert_eq!(
            response.shards.get("shard_1"),
            Some(&vec!["2".to_string(), "4".to_string(), "6".to_string()])
        );
        assert_eq!(response.id.len(), 64);
    }

    #[tokio::test]
    async fn test_same_request_yields_same_partition_id() {
        let client = MockJamfClient::new()
            .users_ret(Ok(vec![UserAccount { id: 1 }, UserAccount { id: 2 }]));

        let first = process_request(&client, user_request())
            .await
            .expect("request failed");
        let second = process_request(&client, user_request())
            .await
            .expect("request failed");

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_stray_group_id_does_not_change_the_partition_id() {
        let client = MockJamfClient::new()
            .users_ret(Ok(vec![UserAccount { id: 1 }, UserAccount { id: 2 }]));

        let bare = process_request(&client, user_request())
            .await
            .expect("request failed");

        let mut request = user_request();
        request.group_id = Some("12".to_string());
        let with_stray = process_request(&client, request)
            .await
            .expect("request failed");

        assert_eq!(bare.id, with_stray.id);
    }

    #[tokio::test]
    async fn test_invalid_request_never_fetches() {
        let client = MockJamfClient::new();
        let mut request = user_request();
        request.shard_count = Some(0);

        let err = process_request(&client, request)
            .await
            .expect_err("expected error");

        assert!(matches!(err, ShardError::InvalidShardCount(0)));
        assert!(client.get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let client = MockJamfClient::new().users_ret(Err(JamfError::Api {
            status: 503,
            context: "maintenance".to_string(),
        }));

        let err = process_request(&client, user_request())
            .await
            .expect_err("expected error");

        assert!(matches!(err, ShardError::UpstreamError { .. }));
    }
}
