use sha2::{Digest, Sha256};

/// Deals the pool out one ID per shard in turn. Shard sizes differ by at
/// most one.
pub fn round_robin(pool: Vec<String>, shard_count: usize) -> Vec<Vec<String>> {
    let mut shards = vec![Vec::new(); shard_count];
    for (i, id) in pool.into_iter().enumerate() {
        shards[i % shard_count].push(id);
    }
    shards
}

/// Takes contiguous runs sized as a floored percentage of `total`; the last
/// shard absorbs whatever remains, so rounding never drops an ID. Reserved
/// counts shrink each shard's target because reserved IDs already count
/// toward it.
pub fn percentage(
    pool: Vec<String>,
    percentages: &[usize],
    total: usize,
    reserved_counts: &[usize],
) -> Vec<Vec<String>> {
    let shard_count = percentages.len();
    let mut remaining = pool.len();
    let mut iter = pool.into_iter();
    let mut shards = Vec::with_capacity(shard_count);

    for (i, &pct) in percentages.iter().enumerate() {
        let take = if i == shard_count - 1 {
            remaining
        } else {
            (total * pct / 100)
                .saturating_sub(reserved_counts[i])
                .min(remaining)
        };
        shards.push(iter.by_ref().take(take).collect());
        remaining -= take;
    }

    shards
}

/// Takes contiguous runs of absolute sizes. `-1` in the last position
/// absorbs the remainder; an exhausted pool leaves the remaining shards
/// empty rather than failing.
pub fn by_size(pool: Vec<String>, sizes: &[i64], reserved_counts: &[usize]) -> Vec<Vec<String>> {
    let mut remaining = pool.len();
    let mut iter = pool.into_iter();
    let mut shards = Vec::with_capacity(sizes.len());

    for (i, &size) in sizes.iter().enumerate() {
        let take = if size < 0 {
            remaining
        } else {
            (size as usize)
                .saturating_sub(reserved_counts[i])
                .min(remaining)
        };
        shards.push(iter.by_ref().take(take).collect());
        remaining -= take;
    }

    shards
}

/// Highest-random-weight hashing: each ID goes to the shard index with the
/// strictly greatest weight, ties keeping the lower index. Placement
/// depends only on the ID, the seed and the shard count, so growing from n
/// to n+1 shards relocates roughly 1/(n+1) of the pool and nothing else.
pub fn rendezvous(pool: Vec<String>, shard_count: usize, seed: &str) -> Vec<Vec<String>> {
    let mut shards = vec![Vec::new(); shard_count];
    for id in pool {
        let index = rendezvous_shard(&id, shard_count, seed);
        shards[index].push(id);
    }
    shards
}

fn rendezvous_shard(id: &str, shard_count: usize, seed: &str) -> usize {
    let mut best = 0usize;
    let mut best_weight = 0u64;

    for index in 0..shard_count {
        let weight = rendezvous_weight(id, index, seed);
        if weight > best_weight {
            best_weight = weight;
            best = index;
        }
    }

    best
}

/// Weight of one (ID, shard) pairing: the first 8 bytes, big-endian, of
/// SHA-256 over `<id>:shard_<index>:<seed>`.
fn rendezvous_weight(id: &str, shard_index: usize, seed: &str) -> u64 {
    let digest = Sha256::digest(format!("{id}:shard_{shard_index}:{seed}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
