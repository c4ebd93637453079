//! Deterministic hashing for reproducible synthetic placemark fields.

/// Mix a seed and a sample index into one value (xorshift)
#[inline(always)]
pub fn hash2(seed: u64, index: u64) -> u64 {
    let mut x = seed.wrapping_mul(2654435761).wrapping_add(index.wrapping_mul(2246822519));
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// Uniform value in `[0, 1)` from any seed (splitmix64 finalizer)
#[inline(always)]
pub fn rand_simple(seed: u64) -> f64 {
    let mut x = seed.wrapping_mul(0x9e3779b97f4a7c15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_in_unit_interval() {
        for i in 0..1_000 {
            let r = rand_simple(hash2(7, i));
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_small_seeds_differ() {
        assert_ne!(hash2(0, 1), hash2(0, 2));
        assert_ne!(rand_simple(1), rand_simple(2));
    }
}
