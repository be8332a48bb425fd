use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::errors::ShardError;
use crate::sharding::{ReservedIds, ShardSpec, Strategy};

/// Which upstream collection supplies the candidate IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    ComputerInventory,
    MobileDeviceInventory,
    ComputerGroupMembership,
    MobileDeviceGroupMembership,
    UserAccounts,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::ComputerInventory => "computer_inventory",
            SourceType::MobileDeviceInventory => "mobile_device_inventory",
            SourceType::ComputerGroupMembership => "computer_group_membership",
            SourceType::MobileDeviceGroupMembership => "mobile_device_group_membership",
            SourceType::UserAccounts => "user_accounts",
        }
    }

    pub fn requires_group_id(&self) -> bool {
        matches!(
            self,
            SourceType::ComputerGroupMembership | SourceType::MobileDeviceGroupMembership
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    RoundRobin,
    Percentage,
    Size,
    Rendezvous,
}

/// Body of `POST /shards`, as it arrives on the wire. `resolve` turns it
/// into a typed plan or rejects it; nothing downstream sees an invalid
/// combination.
#[derive(Debug, Clone, Deserialize)]
pub struct ShardRequest {
    pub source_type: SourceType,
    pub group_id: Option<String>,
    pub strategy: StrategyKind,
    pub shard_count: Option<i64>,
    pub shard_percentages: Option<Vec<i64>>,
    pub shard_sizes: Option<Vec<i64>>,
    pub seed: Option<String>,
    #[serde(default)]
    pub exclude_ids: Vec<String>,
    #[serde(default)]
    pub reserved_ids: HashMap<String, Vec<String>>,
}

/// A fully validated request: where to fetch from and how to carve the
/// result up.
#[derive(Debug, Clone)]
pub struct ShardPlan {
    pub source_type: SourceType,
    pub group_id: Option<String>,
    pub spec: ShardSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShardResponse {
    pub id: String,
    pub shards: HashMap<String, Vec<String>>,
}

impl ShardRequest {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ShardError> {
        serde_json::from_slice(bytes).map_err(|e| ShardError::RequestDecodingError(e.to_string()))
    }

    pub fn resolve(self) -> Result<ShardPlan, ShardError> {
        let strategy = self.resolve_strategy()?;

        // Only membership sources read group_id; stray values are dropped.
        let requires_group_id = self.source_type.requires_group_id();
        let group_id = match self.group_id {
            Some(group_id) if requires_group_id && !group_id.is_empty() => Some(group_id),
            _ => None,
        };
        if requires_group_id && group_id.is_none() {
            return Err(ShardError::MissingGroupId(self.source_type.as_str()));
        }
        if let Some(group_id) = &group_id {
            if !is_numeric_id(group_id) {
                return Err(ShardError::InvalidGroupId(group_id.clone()));
            }
        }

        for id in &self.exclude_ids {
            if !is_numeric_id(id) {
                return Err(ShardError::InvalidId(id.clone()));
            }
        }
        for id in self.reserved_ids.values().flatten() {
            if !is_numeric_id(id) {
                return Err(ShardError::InvalidId(id.clone()));
            }
        }

        let reserved =
            ReservedIds::parse(&self.reserved_ids, strategy.shard_count(), &self.exclude_ids)?;

        Ok(ShardPlan {
            source_type: self.source_type,
            group_id,
            spec: ShardSpec {
                strategy,
                seed: self.seed.unwrap_or_default(),
                exclude_ids: self.exclude_ids,
                reserved,
            },
        })
    }

    fn resolve_strategy(&self) -> Result<Strategy, ShardError> {
        let provided = [
            self.shard_count.is_some(),
            self.shard_percentages.is_some(),
            self.shard_sizes.is_some(),
        ];
        if provided.iter().filter(|set| **set).count() != 1 {
            return Err(ShardError::ShardLayoutConflict);
        }

        match self.strategy {
            StrategyKind::RoundRobin => Ok(Strategy::RoundRobin {
                shard_count: self.validated_shard_count("round-robin")?,
            }),
            StrategyKind::Rendezvous => Ok(Strategy::Rendezvous {
                shard_count: self.validated_shard_count("rendezvous")?,
            }),
            StrategyKind::Percentage => {
                let percentages = self.shard_percentages.as_deref().ok_or(
                    ShardError::MissingStrategyParams {
                        strategy: "percentage",
                        required: "shard_percentages",
                    },
                )?;
                if percentages.is_empty() {
                    return Err(ShardError::EmptyShardLayout("shard_percentages"));
                }

                let mut sum = 0i64;
                for &pct in percentages {
                    if pct < 0 {
                        return Err(ShardError::NegativePercentage(pct));
                    }
                    // Saturating: a sum past i64::MAX cannot come back to 100.
                    sum = sum.saturating_add(pct);
                }
                if sum != 100 {
                    return Err(ShardError::PercentageSum(sum));
                }

                Ok(Strategy::Percentage {
                    percentages: percentages.iter().map(|&pct| pct as usize).collect(),
                })
            }
            StrategyKind::Size => {
                let sizes =
                    self.shard_sizes
                        .as_deref()
                        .ok_or(ShardError::MissingStrategyParams {
                            strategy: "size",
                            required: "shard_sizes",
                        })?;
                if sizes.is_empty() {
                    return Err(ShardError::EmptyShardLayout("shard_sizes"));
                }

                for (i, &size) in sizes.iter().enumerate() {
                    let takes_remainder = size == -1 && i == sizes.len() - 1;
                    if size < 1 && !takes_remainder {
                        return Err(ShardError::InvalidShardSize(size));
                    }
                }

                Ok(Strategy::Size {
                    sizes: sizes.to_vec(),
                })
            }
        }
    }

    fn validated_shard_count(&self, strategy: &'static str) -> Result<usize, ShardError> {
        let count = self
            .shard_count
            .ok_or(ShardError::MissingStrategyParams {
                strategy,
                required: "shard_count",
            })?;
        if count < 1 {
            return Err(ShardError::InvalidShardCount(count));
        }
        Ok(count as usize)
    }
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
