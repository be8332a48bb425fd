use std::collections::HashSet;

use common_jamf::{JamfClient, JamfError};
use tracing::debug;

use crate::api::errors::ShardError;
use crate::api::types::SourceType;

/// Fetches the candidate ID pool for a source from Jamf Pro.
///
/// Inventory sources keep managed devices only; group and user sources
/// return every member. IDs come back in upstream order with duplicates
/// removed, and the caller decides how to order and split them.
pub async fn fetch_ids(
    client: &(dyn JamfClient + Send + Sync),
    source_type: SourceType,
    group_id: Option<&str>,
) -> Result<Vec<String>, ShardError> {
    let ids = match source_type {
        SourceType::ComputerInventory => {
            let computers = client
                .list_computers()
                .await
                .map_err(upstream("listing computer inventory"))?;
            let total = computers.len();
            let ids: Vec<String> = computers
                .into_iter()
                .filter(|computer| computer.is_managed())
                .map(|computer| computer.id)
                .collect();
            debug!(total, managed = ids.len(), "kept managed computers only");
            ids
        }
        SourceType::MobileDeviceInventory => {
            let devices = client
                .list_mobile_devices()
                .await
                .map_err(upstream("listing mobile device inventory"))?;
            let total = devices.len();
            let ids: Vec<String> = devices
                .into_iter()
                .filter(|device| device.managed)
                .map(|device| device.id.to_string())
                .collect();
            debug!(total, managed = ids.len(), "kept managed mobile devices only");
            ids
        }
        SourceType::ComputerGroupMembership => {
            let group_id = require_group_id(source_type, group_id)?;
            let group = client
                .get_computer_group(group_id)
                .await
                .map_err(upstream("fetching computer group"))?;
            group
                .computers
                .into_iter()
                .map(|member| member.id.to_string())
                .collect()
        }
        SourceType::MobileDeviceGroupMembership => {
            let group_id = require_group_id(source_type, group_id)?;
            let group = client
                .get_mobile_device_group(group_id)
                .await
                .map_err(upstream("fetching mobile device group"))?;
            group
                .mobile_devices
                .into_iter()
                .map(|member| member.id.to_string())
                .collect()
        }
        SourceType::UserAccounts => {
            let users = client
                .list_users()
                .await
                .map_err(upstream("listing user accounts"))?;
            users.into_iter().map(|user| user.id.to_string()).collect()
        }
    };

    Ok(dedup(ids))
}

fn require_group_id(
    source_type: SourceType,
    group_id: Option<&str>,
) -> Result<&str, ShardError> {
    group_id.ok_or(ShardError::MissingGroupId(source_type.as_str()))
}

fn upstream(context: &'static str) -> impl FnOnce(JamfError) -> ShardError {
    move |source| ShardError::UpstreamError { context, source }
}

// Jamf group listings occasionally repeat a member across pages of the
// same group; first occurrence wins.
fn dedup(ids: Vec<String>) -> Vec<String> {
    let before = ids.len();
    let mut seen = HashSet::with_capacity(before);
    let deduped: Vec<String> = ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();
    if deduped.len() < before {
        debug!(
            duplicates = before - deduped.len(),
            "dropped duplicate ids from upstream listing"
        );
    }
    deduped
}
