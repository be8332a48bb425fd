use std::collections::{HashMap, HashSet};

use crate::api::errors::ShardError;

/// Drops excluded IDs from the pool before any distribution happens.
/// Excluded IDs never appear in the output, whatever else is configured.
pub fn apply_exclusions(ids: Vec<String>, exclude_ids: &[String]) -> Vec<String> {
    if exclude_ids.is_empty() {
        return ids;
    }

    let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();
    let before = ids.len();
    let kept: Vec<String> = ids
        .into_iter()
        .filter(|id| !excluded.contains(id.as_str()))
        .collect();

    if kept.len() < before {
        tracing::debug!(excluded = before - kept.len(), "removed excluded ids");
    }
    kept
}

/// IDs pinned to specific shards ahead of distribution. Pinning is
/// unconditional: a reserved ID lands in its shard even when the upstream
/// listing does not contain it.
#[derive(Debug, Clone)]
pub struct ReservedIds {
    by_shard: Vec<Vec<String>>,
    all: HashSet<String>,
}

impl ReservedIds {
    pub fn none(shard_count: usize) -> Self {
        Self {
            by_shard: vec![Vec::new(); shard_count],
            all: HashSet::new(),
        }
    }

    /// Validates a `shard name -> IDs` mapping against the resolved shard
    /// count and the exclusion list. Shard names must parse as
    /// `shard_<index>` with the index in range; an ID may be reserved at
    /// most once and may not also be excluded.
    pub fn parse(
        reserved: &HashMap<String, Vec<String>>,
        shard_count: usize,
        exclude_ids: &[String],
    ) -> Result<Self, ShardError> {
        let mut by_shard = vec![Vec::new(); shard_count];
        let mut all = HashSet::new();
        let excluded: HashSet<&str> = exclude_ids.iter().map(String::as_str).collect();

        for (name, ids) in reserved {
            let index = parse_shard_name(name)?;
            if index >= shard_count {
                return Err(ShardError::ShardNameOutOfRange {
                    name: name.clone(),
                    shard_count,
                });
            }

            for id in ids {
                if excluded.contains(id.as_str()) {
                    return Err(ShardError::ReservedAndExcluded(id.clone()));
                }
                if !all.insert(id.clone()) {
                    return Err(ShardError::DuplicateReservation(id.clone()));
                }
                by_shard[index].push(id.clone());
            }
        }

        Ok(Self { by_shard, all })
    }

    pub fn ids_for(&self, shard: usize) -> &[String] {
        &self.by_shard[shard]
    }

    /// Reserved ID count per shard index, used to shrink percentage and
    /// size targets so reserved IDs count toward them.
    pub fn counts(&self) -> Vec<usize> {
        self.by_shard.iter().map(Vec::len).collect()
    }

    /// Removes reserved IDs from the pool, leaving what the strategy is
    /// free to distribute.
    pub fn split_pool(&self, ids: Vec<String>) -> Vec<String> {
        if self.all.is_empty() {
            return ids;
        }
        ids.into_iter()
            .filter(|id| !self.all.contains(id))
            .collect()
    }
}

fn parse_shard_name(name: &str) -> Result<usize, ShardError> {
    // Digits only: integer parsing alone would let a sign prefix through.
    name.strip_prefix("shard_")
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|suffix| suffix.parse::<usize>().ok())
        .ok_or_else(|| ShardError::InvalidShardName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn reserved_map(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, list)| (name.to_string(), ids(list)))
            .collect()
    }

    #[test]
    fn test_exclusions_remove_ids() {
        let kept = apply_exclusions(ids(&["1", "2", "3", "4"]), &ids(&["2", "4", "99"]));
        assert_eq!(kept, ids(&["1", "3"]));
    }

    #[test]
    fn test_no_exclusions_is_a_passthrough() {
        let pool = ids(&["1", "2"]);
        assert_eq!(apply_exclusions(pool.clone(), &[]), pool);
    }

    #[test]
    fn test_parse_assigns_ids_to_shard_indexes() {
        let map = reserved_map(&[("shard_0", &["10"]), ("shard_2", &["20", "30"])]);
        let reserved = ReservedIds::parse(&map, 3, &[]).expect("parse failed");

        assert_eq!(reserved.ids_for(0), ids(&["10"]));
        assert!(reserved.ids_for(1).is_empty());
        assert_eq!(reserved.counts(), vec![1, 0, 2]);
    }

    #[test]
    fn test_malformed_shard_name_is_rejected() {
        let map = reserved_map(&[("shard_x", &["1"])]);
        let err = ReservedIds::parse(&map, 3, &[]).expect_err("expected error");
        assert!(matches!(err, ShardError::InvalidShardName(_)));

        let map = reserved_map(&[("group_1", &["1"])]);
        let err = ReservedIds::parse(&map, 3, &[]).expect_err("expected error");
        assert!(matches!(err, ShardError::InvalidShardName(_)));

        let map = reserved_map(&[("shard_+1", &["1"])]);
        let err = ReservedIds::parse(&map, 3, &[]).expect_err("expected error");
        assert!(matches!(err, ShardError::InvalidShardName(_)));
    }

    #[test]
    fn test_out_of_range_shard_name_is_rejected() {
        let map = reserved_map(&[("shard_3", &["1"])]);
        let err = ReservedIds::parse(&map, 3, &[]).expect_err("expected error");
        assert!(matches!(
            err,
            ShardError::ShardNameOutOfRange { shard_count: 3, .. }
        ));
    }

    #[test]
    fn test_reserving_an_excluded_id_is_rejected() {
        let map = reserved_map(&[("shard_0", &["42"])]);
        let err = ReservedIds::parse(&map, 3, &ids(&["42"])).expect_err("expected error");
        assert!(matches!(err, ShardError::ReservedAndExcluded(id) if id == "42"));
    }

    #[test]
    fn test_reserving_an_id_twice_is_rejected() {
        let map = reserved_map(&[("shard_0", &["7"]), ("shard_1", &["7"])]);
        let err = ReservedIds::parse(&map, 3, &[]).expect_err("expected error");
        assert!(matches!(err, ShardError::DuplicateReservation(id) if id == "7"));
    }

    #[test]
    fn test_split_pool_removes_reserved_ids() {
        let map = reserved_map(&[("shard_1", &["2", "4"])]);
        let reserved = ReservedIds::parse(&map, 2, &[]).expect("parse failed");

        let pool = reserved.split_pool(ids(&["1", "2", "3", "4", "5"]));
        assert_eq!(pool, ids(&["1", "3", "5"]));
    }

    #[test]
    fn test_reserved_id_absent_upstream_is_still_pinned() {
        let map = reserved_map(&[("shard_0", &["999"])]);
        let reserved = ReservedIds::parse(&map, 1, &[]).expect("parse failed");

        let pool = reserved.split_pool(ids(&["1", "2"]));
        assert_eq!(pool, ids(&["1", "2"]));
        assert_eq!(reserved.ids_for(0), ids(&["999"]));
    }
}
