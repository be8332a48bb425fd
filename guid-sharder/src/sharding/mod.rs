use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};

use crate::api::types::SourceType;

pub mod prepare;
pub mod reservations;
mod strategies;

pub use reservations::ReservedIds;

/// How the pool is carved up, resolved from the request before any fetch.
/// Invalid layouts never reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    RoundRobin { shard_count: usize },
    Percentage { percentages: Vec<usize> },
    Size { sizes: Vec<i64> },
    Rendezvous { shard_count: usize },
}

impl Strategy {
    pub fn shard_count(&self) -> usize {
        match self {
            Strategy::RoundRobin { shard_count } | Strategy::Rendezvous { shard_count } => {
                *shard_count
            }
            Strategy::Percentage { percentages } => percentages.len(),
            Strategy::Size { sizes } => sizes.len(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RoundRobin { .. } => "round-robin",
            Strategy::Percentage { .. } => "percentage",
            Strategy::Size { .. } => "size",
            Strategy::Rendezvous { .. } => "rendezvous",
        }
    }
}

/// A validated sharding instruction: the strategy plus the seed and the
/// exclusion/reservation adjustments that apply before distribution.
#[derive(Debug, Clone)]
pub struct ShardSpec {
    pub strategy: Strategy,
    pub seed: String,
    pub exclude_ids: Vec<String>,
    pub reserved: ReservedIds,
}

impl ShardSpec {
    pub fn new(strategy: Strategy) -> Self {
        let shard_count = strategy.shard_count();
        Self {
            strategy,
            seed: String::new(),
            exclude_ids: Vec::new(),
            reserved: ReservedIds::none(shard_count),
        }
    }
}

/// Runs the pipeline on an already-fetched pool: dedup, exclusions,
/// reservation split, distribution, then a numeric sort per shard. Every
/// shard is present in the result; one with nothing assigned is an empty
/// list, not a missing key.
pub fn build_shards(ids: Vec<String>, spec: &ShardSpec) -> HashMap<String, Vec<String>> {
    let ids = dedup_preserving_order(ids);
    let filtered = reservations::apply_exclusions(ids, &spec.exclude_ids);
    // Percentage targets count reserved IDs against the post-exclusion
    // total, not just the distributable pool.
    let total = filtered.len();
    let pool = spec.reserved.split_pool(filtered);
    let reserved_counts = spec.reserved.counts();

    let distributed = match &spec.strategy {
        Strategy::RoundRobin { shard_count } => {
            strategies::round_robin(prepare::prepare(pool, &spec.seed), *shard_count)
        }
        Strategy::Percentage { percentages } => strategies::percentage(
            prepare::prepare(pool, &spec.seed),
            percentages,
            total,
            &reserved_counts,
        ),
        Strategy::Size { sizes } => {
            strategies::by_size(prepare::prepare(pool, &spec.seed), sizes, &reserved_counts)
        }
        // Placement is per-ID, so pool order never matters here.
        Strategy::Rendezvous { shard_count } => {
            strategies::rendezvous(pool, *shard_count, &spec.seed)
        }
    };

    let mut shards = HashMap::with_capacity(distributed.len());
    for (index, mut distributed_ids) in distributed.into_iter().enumerate() {
        let mut shard = spec.reserved.ids_for(index).to_vec();
        shard.append(&mut distributed_ids);
        prepare::sort_ids_numerically(&mut shard);
        shards.insert(format!("shard_{index}"), shard);
    }
    shards
}

/// Stable identifier for a shard layout. Only the defining parameters are
/// hashed; the fetched IDs are deliberately left out so inventory churn
/// does not read as a configuration change.
pub fn partition_id(
    source_type: SourceType,
    strategy: &Strategy,
    seed: &str,
    group_id: Option<&str>,
) -> String {
    let input = format!(
        "{}:{}:{}:{}:{}",
        source_type.as_str(),
        strategy.shard_count(),
        strategy.name(),
        seed,
        group_id.unwrap_or_default(),
    );
    hex::encode(Sha256::digest(input.as_bytes()))
}

fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
