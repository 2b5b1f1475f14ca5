//! Combinatorial helpers for the card game.
//!
//! Binomial ratios are evaluated as products of fractions so they stay
//! finite for any deck size; degenerate ratios collapse to 0 or 1.

use rand::seq::SliceRandom;
use rand::Rng;

/// Probability that a random `hand` drawn from `pool` unseen cards contains
/// only cards from the `lower` cards below some threshold.
///
/// This is `C(lower, hand) / C(pool, hand)`. A hand larger than the pool
/// takes the whole pool, so the ratio is 1 if every unseen card is lower
/// and 0 otherwise. The result is always in `[0, 1]`, never NaN.
pub fn prob_all_lower(lower: u64, pool: u64, hand: u64) -> f64 {
    let lower = lower.min(pool);
    let hand = hand.min(pool);

    if hand == 0 {
        return 1.0;
    }
    if lower < hand {
        return 0.0;
    }

    (0..hand)
        .map(|i| (lower - i) as f64 / (pool - i) as f64)
        .product()
}

/// Binomial coefficient `C(n, r)` as a float.
pub fn binomial(n: u64, r: u64) -> f64 {
    if r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    (0..r).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// `n!`, or `None` if it does not fit in a `u64` (n > 20).
pub fn permutation_count(n: u32) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, x| acc.checked_mul(x))
}

/// Rearrange `items` into the next permutation in lexicographic order.
///
/// Returns `false` and leaves `items` sorted ascending once the last
/// permutation has been passed.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Overwrite `buf` with a uniformly random permutation of `1..=n`.
pub fn shuffle_into<R: Rng>(buf: &mut Vec<u32>, n: u32, rng: &mut R) {
    buf.clear();
    buf.extend(1..=n);
    buf.shuffle(rng);
}

/// Expected maximum of `k` distinct cards drawn uniformly from `1..=n`.
///
/// Closed form `k (n + 1) / (k + 1)`.
pub fn expected_max(n: u32, k: u32) -> f64 {
    k as f64 * (n as f64 + 1.0) / (k as f64 + 1.0)
}

/// Probability that the first party wins a showdown when both play, over
/// uniformly random deals.
///
/// The highest card among everything dealt is equally likely to sit in any
/// of the dealt slots: `k` for the first party, `k` (plus the draw, if the
/// deck is not empty) for the second.
pub fn first_party_win_probability(n: u32, k: u32) -> f64 {
    let (n, k) = (u64::from(n), u64::from(k));
    let draw = if n > 2 * k { 1 } else { 0 };
    k as f64 / (2 * k + draw) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prob_all_lower_matches_binomial_ratio() {
        for pool in 1..12u64 {
            for lower in 0..=pool {
                for hand in 1..=pool {
                    let expected = binomial(lower, hand) / binomial(pool, hand);
                    let actual = prob_all_lower(lower, pool, hand);
                    assert!(
                        (expected - actual).abs() < 1e-12,
                        "C({}, {}) / C({}, {})",
                        lower,
                        hand,
                        pool,
                        hand
                    );
                }
            }
        }
    }

    #[test]
    fn test_prob_all_lower_boundaries() {
        assert_eq!(prob_all_lower(3, 5, 0), 1.0);
        assert_eq!(prob_all_lower(0, 0, 0), 1.0);
        assert_eq!(prob_all_lower(0, 0, 3), 1.0);
        assert_eq!(prob_all_lower(1, 5, 2), 0.0);

        // Hand larger than the pool: the opponent holds the whole pool.
        assert_eq!(prob_all_lower(4, 4, 6), 1.0);
        assert_eq!(prob_all_lower(3, 4, 6), 0.0);

        for pool in 0..6 {
            for lower in 0..=pool {
                for hand in 0..9 {
                    let p = prob_all_lower(lower, pool, hand);
                    assert!(p.is_finite() && (0.0..=1.0).contains(&p));
                }
            }
        }
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(10, 0), 1.0);
        assert_eq!(binomial(3, 4), 0.0);
        assert!((binomial(20, 10) - 184_756.0).abs() < 1e-6);
    }

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutation_count(0), Some(1));
        assert_eq!(permutation_count(5), Some(120));
        assert_eq!(permutation_count(20), Some(2_432_902_008_176_640_000));
        assert_eq!(permutation_count(21), None);
    }

    #[test]
    fn test_next_permutation_enumerates_all() {
        let mut items = vec![1, 2, 3, 4];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(seen.len(), 24);
        assert_eq!(items, vec![1, 2, 3, 4]);

        let mut sorted = seen.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, seen);
    }

    #[test]
    fn test_shuffle_into() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut buf = vec![99];
        shuffle_into(&mut buf, 8, &mut rng);
        let mut sorted = buf.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_closed_forms() {
        assert!((expected_max(10, 1) - 5.5).abs() < 1e-12);
        assert!((expected_max(6, 2) - 14.0 / 3.0).abs() < 1e-12);
        assert!((first_party_win_probability(10, 2) - 0.4).abs() < 1e-12);
        assert_eq!(first_party_win_probability(4, 2), 0.5);
    }
}
