use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Sorts IDs by their numeric value. IDs are numeric strings in practice;
/// anything unparsable sorts as 0 and keeps its relative position (the sort
/// is stable).
pub fn sort_ids_numerically(ids: &mut [String]) {
    ids.sort_by_key(|id| id.parse::<u64>().unwrap_or(0));
}

/// Derives a PRNG from the seed string: the first 8 bytes of its SHA-256
/// digest, big-endian. The same seed always yields the same shuffle.
pub fn seeded_rng(seed: &str) -> StdRng {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    StdRng::seed_from_u64(u64::from_be_bytes(bytes))
}

/// Orders the pool for positional strategies. Without a seed the upstream
/// order is used as-is; upstream order is not a stability guarantee, so
/// unseeded output can change when the server reorders results. With a seed
/// the pool is sorted numerically first, which makes the shuffle a pure
/// function of the ID set and the seed.
pub fn prepare(mut ids: Vec<String>, seed: &str) -> Vec<String> {
    if seed.is_empty() {
        return ids;
    }

    sort_ids_numerically(&mut ids);
    let mut rng = seeded_rng(seed);
    ids.shuffle(&mut rng);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let mut pool = ids(&["10", "2", "100", "1", "50"]);
        sort_ids_numerically(&mut pool);
        assert_eq!(pool, ids(&["1", "2", "10", "50", "100"]));
    }

    #[test]
    fn test_no_seed_keeps_upstream_order() {
        let pool = ids(&["9", "3", "7", "1"]);
        assert_eq!(prepare(pool.clone(), ""), pool);
    }

    #[test]
    fn test_same_seed_same_order() {
        let pool = ids(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        let first = prepare(pool.clone(), "os-updates");
        let second = prepare(pool, "os-updates");
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let pool: Vec<String> = (1..=50).map(|n| n.to_string()).collect();
        let first = prepare(pool.clone(), "wave-1");
        let second = prepare(pool, "wave-2");
        assert_ne!(first, second);
    }

    #[test]
    fn test_seeded_order_ignores_upstream_order() {
        let pool = ids(&["5", "3", "1", "4", "2"]);
        let mut reversed = pool.clone();
        reversed.reverse();

        assert_eq!(prepare(pool, "pilot"), prepare(reversed, "pilot"));
    }

    #[test]
    fn test_shuffle_keeps_every_id() {
        let pool: Vec<String> = (1..=100).map(|n| n.to_string()).collect();
        let mut shuffled = prepare(pool.clone(), "keep-all");
        sort_ids_numerically(&mut shuffled);
        assert_eq!(shuffled, pool);
    }
}
