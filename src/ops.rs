//! Operation library module
//!
//! Pure arithmetic functions behind the compute endpoint: Fibonacci sequence
//! generation, prime filtering, and the LCM/HCF folds. All functions are
//! total over their validated input domains; validation happens upstream in
//! the dispatcher. Results are carried in 128-bit arithmetic; computations
//! whose result cannot be represented report [`Overflow`] instead of
//! panicking or wrapping.

/// Marker for a computation whose result exceeds the 128-bit integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// First `n` terms of the Fibonacci sequence starting `0, 1, 1, 2, 3, ...`.
///
/// Terms are computed in 128-bit arithmetic so indexes well past the 64-bit
/// overflow point stay exact. The last representable term is index 186;
/// requests needing terms beyond it fail with [`Overflow`].
pub fn fibonacci(n: u64) -> Result<Vec<u128>, Overflow> {
    // Capacity is a hint only: overflow stops generation long before large
    // n, so never pre-reserve the full requested length
    let mut seq: Vec<u128> = Vec::with_capacity(usize::try_from(n.min(1024)).unwrap_or(0));
    if n >= 1 {
        seq.push(0);
    }
    if n >= 2 {
        seq.push(1);
    }
    while (seq.len() as u64) < n {
        let len = seq.len();
        let next = seq[len - 1].checked_add(seq[len - 2]).ok_or(Overflow)?;
        seq.push(next);
    }
    Ok(seq)
}

/// Primality test by trial division.
///
/// Numbers below 2 are never prime (covers negatives, 0 and 1). Even numbers
/// above 2 are composite; odd candidates are tested against odd divisors up
/// to the integer square root. The bound is hoisted via `isqrt` so the guard
/// never multiplies, which stays exact even for candidates near `i64::MAX`.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let limit = n.isqrt();
    let mut d: i64 = 3;
    while d <= limit {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Order-preserving subsequence of `xs` containing only the primes.
pub fn filter_primes(xs: &[i64]) -> Vec<i64> {
    xs.iter().copied().filter(|&x| is_prime(x)).collect()
}

/// Euclidean greatest common divisor on absolute values.
pub fn gcd(a: u128, b: u128) -> u128 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Pairwise least common multiple with the zero short-circuit:
/// `lcm(a, 0) = lcm(0, b) = 0`.
fn lcm_pair(a: u128, b: u128) -> Result<u128, Overflow> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    (a / gcd(a, b)).checked_mul(b).ok_or(Overflow)
}

/// LCM of a sequence: left fold seeded with the identity value 1.
///
/// The zero short-circuit is applied per pair exactly as combined, never by
/// pre-filtering zeros, so any zero anywhere collapses the result to 0.
/// A fold whose running value leaves the `i128` range fails with
/// [`Overflow`] rather than saturating.
pub fn fold_lcm(xs: &[i64]) -> Result<i128, Overflow> {
    let acc = xs
        .iter()
        .try_fold(1u128, |acc, &x| lcm_pair(acc, u128::from(x.unsigned_abs())))?;
    i128::try_from(acc).map_err(|_| Overflow)
}

/// HCF of a non-empty sequence: left fold with the first element as seed,
/// combining pairwise on absolute values.
///
/// Empty input is guarded by upstream validation; it is an invariant here,
/// answered with 0 (the gcd identity) rather than a panic.
pub fn fold_hcf(xs: &[i64]) -> i128 {
    let mut iter = xs.iter().map(|x| u128::from(x.unsigned_abs()));
    let Some(first) = iter.next() else {
        return 0;
    };
    let acc = iter.fold(first, gcd);
    // The gcd is bounded by the largest input magnitude, which fits i128
    i128::try_from(acc).unwrap_or(i128::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Largest prime below 2^63, and two more large primes for coprime folds
    const BIG_PRIME_A: i64 = 9_223_372_036_854_775_783;
    const BIG_PRIME_B: i64 = 9_223_372_036_854_775_643;
    const BIG_PRIME_C: i64 = 9_223_372_036_854_775_549;

    #[test]
    fn test_fibonacci_small() {
        assert_eq!(fibonacci(0).unwrap(), Vec::<u128>::new());
        assert_eq!(fibonacci(1).unwrap(), vec![0]);
        assert_eq!(fibonacci(2).unwrap(), vec![0, 1]);
        assert_eq!(fibonacci(5).unwrap(), vec![0, 1, 1, 2, 3]);
        assert_eq!(fibonacci(10).unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn test_fibonacci_recurrence() {
        let seq = fibonacci(50).unwrap();
        assert_eq!(seq.len(), 50);
        for i in 2..seq.len() {
            assert_eq!(seq[i], seq[i - 1] + seq[i - 2]);
        }
    }

    #[test]
    fn test_fibonacci_past_u64_range() {
        // fib(93) overflows u64; the 128-bit terms must stay exact
        let seq = fibonacci(100).unwrap();
        assert_eq!(seq[93], 12_200_160_415_121_876_738);
        assert_eq!(seq[99], 218_922_995_834_555_169_026);
    }

    #[test]
    fn test_fibonacci_full_u128_range() {
        // Index 186 is the last term representable in u128; the full
        // sequence up to it must come back exact, with the recurrence intact
        let seq = fibonacci(187).unwrap();
        assert_eq!(seq.len(), 187);
        assert_eq!(seq[186], 332_825_110_087_067_562_321_196_029_789_634_457_848);
        for i in 2..seq.len() {
            assert_eq!(seq[i], seq[i - 1] + seq[i - 2]);
        }
    }

    #[test]
    fn test_fibonacci_overflow_is_error_not_panic() {
        assert_eq!(fibonacci(188), Err(Overflow));
        assert_eq!(fibonacci(190), Err(Overflow));
    }

    #[test]
    fn test_fibonacci_huge_request_fails_fast() {
        // Must not pre-allocate the requested length; overflow at index 187
        // ends generation long before any large allocation
        assert_eq!(fibonacci(1_000_000_000_000), Err(Overflow));
    }

    #[test]
    fn test_is_prime_edges() {
        assert!(!is_prime(-7));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(97));
        assert!(!is_prime(99));
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
        // Squares of primes sit exactly on the divisor bound
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
    }

    #[test]
    fn test_is_prime_large_candidates_no_overflow() {
        // Near i64::MAX the old d*d guard overflowed; these composites must
        // answer without panicking
        assert!(!is_prime(i64::MAX)); // 2^63 - 1 = 7^2 * 73 * 127 * ...
        assert!(!is_prime(9_223_372_036_854_775_806)); // even
        // Largest prime below 10^12: exercises a deep trial-division loop
        assert!(is_prime(999_999_999_989));
    }

    #[test]
    #[ignore = "trial division to isqrt(2^63) takes minutes in debug builds"]
    fn test_is_prime_largest_i64_prime() {
        assert!(is_prime(BIG_PRIME_A));
    }

    #[test]
    fn test_filter_primes_preserves_order() {
        assert_eq!(filter_primes(&[1, 2, 3, 4, 5, 6]), vec![2, 3, 5]);
        assert_eq!(filter_primes(&[11, 4, 7, 9, 2]), vec![11, 7, 2]);
        assert_eq!(filter_primes(&[-3, 0, 1]), Vec::<i64>::new());
    }

    #[test]
    fn test_fold_lcm() {
        assert_eq!(fold_lcm(&[4, 6]).unwrap(), 12);
        assert_eq!(fold_lcm(&[2, 3, 5]).unwrap(), 30);
        assert_eq!(fold_lcm(&[7]).unwrap(), 7);
        assert_eq!(fold_lcm(&[-4, 6]).unwrap(), 12);
    }

    #[test]
    fn test_fold_lcm_zero_short_circuit() {
        assert_eq!(fold_lcm(&[0]).unwrap(), 0);
        assert_eq!(fold_lcm(&[4, 0, 6]).unwrap(), 0);
        assert_eq!(fold_lcm(&[0, 0]).unwrap(), 0);
    }

    #[test]
    fn test_fold_lcm_two_large_coprimes_fits() {
        // The pairwise product of two i64 magnitudes always fits i128
        let lcm = fold_lcm(&[BIG_PRIME_A, BIG_PRIME_B]).unwrap();
        let hcf = fold_hcf(&[BIG_PRIME_A, BIG_PRIME_B]);
        assert_eq!(lcm * hcf, i128::from(BIG_PRIME_A) * i128::from(BIG_PRIME_B));
    }

    #[test]
    fn test_fold_lcm_overflow_is_error_not_panic() {
        // Three large coprimes push the running value past u128
        assert_eq!(fold_lcm(&[BIG_PRIME_A, BIG_PRIME_B, BIG_PRIME_C]), Err(Overflow));
        // Two large coprimes times 3 stays inside u128 but leaves i128;
        // that must also report overflow, never a clamped value
        assert_eq!(fold_lcm(&[BIG_PRIME_A, BIG_PRIME_B, 3]), Err(Overflow));
    }

    #[test]
    fn test_fold_hcf() {
        assert_eq!(fold_hcf(&[12, 18]), 6);
        assert_eq!(fold_hcf(&[12, 18, 8]), 2);
        assert_eq!(fold_hcf(&[7, 13]), 1);
        assert_eq!(fold_hcf(&[-12, 18]), 6);
        assert_eq!(fold_hcf(&[5]), 5);
    }

    #[test]
    fn test_fold_hcf_extreme_magnitudes() {
        // i64::MIN has no positive i64 counterpart; unsigned_abs must carry it
        assert_eq!(fold_hcf(&[i64::MIN, 0]), i128::from(i64::MAX) + 1);
        assert_eq!(fold_hcf(&[i64::MIN, 2]), 2);
    }

    #[test]
    fn test_lcm_hcf_identity() {
        // lcm(a,b) * hcf(a,b) == |a*b| for nonzero a, b
        let samples: &[(i64, i64)] = &[
            (4, 6),
            (12, 18),
            (7, 13),
            (100, 75),
            (-9, 24),
            (1, 999),
            (360, 480),
            (-17, -51),
        ];
        for &(a, b) in samples {
            let product = i128::from(a).abs() * i128::from(b).abs();
            assert_eq!(
                fold_lcm(&[a, b]).unwrap() * fold_hcf(&[a, b]),
                product,
                "a={a} b={b}"
            );
        }
    }

    #[test]
    fn test_fold_order_independence() {
        let xs = [12, 18, 8, 30];
        let permuted = [30, 8, 12, 18];
        assert_eq!(fold_hcf(&xs), fold_hcf(&permuted));
        assert_eq!(fold_lcm(&xs).unwrap(), fold_lcm(&permuted).unwrap());
    }
}
