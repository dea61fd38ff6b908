// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Randomness-consuming helpers for key generation and encryption.
//!
//! Every byte is drawn through [`RngCore::try_fill_bytes`], so a failing
//! source is reported as an error instead of a panic. Prime search uses:
//! - Pre-sieving with small primes to reject bad candidates early
//! - Incremental search from a random odd starting point
//! - Miller-Rabin with a round count chosen per bit length
//!
//! None of this is constant-time.

use ::rand::{CryptoRng, RngCore};
use num_bigint_dig::BigUint;
use num_bigint_dig::prime::probably_prime;
use num_traits::{One, Zero};
use zeroize::Zeroize;

use crate::{Error, Result};

/// Small primes for fast sieving.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
];

/// Candidates examined per random starting point before drawing a new one.
const MAX_INCREMENT: u32 = 4096;

/// Random starting points tried before prime search gives up.
const MAX_PRIME_ATTEMPTS: usize = 64;

/// Rejection-sampling rounds for a uniform value below a bound.
const MAX_SAMPLE_ATTEMPTS: usize = 128;

/// Smallest prime size this module will search for.
pub(crate) const MIN_PRIME_BITS: usize = 16;

/// Draw a uniformly random integer of at most `bits` bits.
fn random_bits<R>(bits: usize, rng: &mut R) -> std::result::Result<BigUint, ::rand::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut bytes = vec![0u8; bits.div_ceil(8)];
    rng.try_fill_bytes(&mut bytes)?;

    // Clear the excess high bits of the leading byte.
    let excess = bytes.len() * 8 - bits;
    if let Some(first) = bytes.first_mut() {
        *first &= 0xff >> excess;
    }

    let value = BigUint::from_bytes_be(&bytes);
    bytes.zeroize();
    Ok(value)
}

/// Sample `r` uniformly from `[1, bound)`.
///
/// Used for encryption nonces, so failures surface as
/// [`Error::EncryptionFailed`].
pub(crate) fn random_below<R>(bound: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if *bound <= BigUint::one() {
        return Err(Error::EncryptionFailed("Sampling bound must exceed 1".into()));
    }

    let bits = bound.bits();
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = random_bits(bits, rng)
            .map_err(|e| Error::EncryptionFailed(format!("Randomness source failed: {e}")))?;

        if !candidate.is_zero() && candidate < *bound {
            return Ok(candidate);
        }
    }

    Err(Error::EncryptionFailed("Exhausted attempts sampling a nonce".into()))
}

/// Generate a random prime of exactly `bits` bits whose two most significant
/// bits are set, so the product of two such primes never loses a bit.
///
/// Used only by key generation, so failures surface as
/// [`Error::KeyGenerationFailed`].
pub(crate) fn random_prime<R>(bits: usize, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bits < MIN_PRIME_BITS {
        return Err(Error::KeyGenerationFailed(format!(
            "Prime size must be at least {MIN_PRIME_BITS} bits, got {bits}"
        )));
    }

    let rounds = optimal_miller_rabin_rounds(bits);

    for _ in 0..MAX_PRIME_ATTEMPTS {
        let mut candidate = generate_candidate(bits, rng)?;

        for _ in 0..MAX_INCREMENT {
            // Walked past the requested size; restart from a fresh base. The
            // second-highest bit can only clear by carrying into bit `bits`.
            if candidate.bits() != bits {
                break;
            }

            if !has_small_factor(&candidate) && probably_prime(&candidate, rounds) {
                return Ok(candidate);
            }

            candidate += 2u32;
        }

        candidate.zeroize();
    }

    Err(Error::KeyGenerationFailed(format!(
        "No {bits}-bit prime found within {MAX_PRIME_ATTEMPTS} attempts"
    )))
}

/// Generate a random odd candidate with its two most significant bits set.
#[inline]
fn generate_candidate<R>(bits: usize, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = random_bits(bits, rng)
        .map_err(|e| Error::KeyGenerationFailed(format!("Randomness source failed: {e}")))?;

    candidate |= BigUint::from(3u32) << (bits - 2);
    candidate |= BigUint::one();

    Ok(candidate)
}

/// Returns true if `n` has a small prime factor other than itself.
///
/// Candidates are always odd, so 2 is not checked.
#[inline]
fn has_small_factor(n: &BigUint) -> bool {
    SIEVE_PRIMES
        .iter()
        .any(|&prime| (n % prime).is_zero() && *n != BigUint::from(prime))
}

/// Miller-Rabin rounds keeping the error probability below 2^-128.
///
/// | Bits  | Rounds |
/// |-------|--------|
/// | ≤256  | 40     |
/// | 512   | 15     |
/// | 1024  | 10     |
/// | 2048  | 6      |
/// | 4096  | 4      |
#[inline]
const fn optimal_miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use ::rand::SeedableRng;
    use ::rand::rngs::StdRng;

    /// A randomness source that has run dry.
    pub(crate) struct ExhaustedRng;

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!("exhausted source")
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!("exhausted source")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unimplemented!("exhausted source")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), ::rand::Error> {
            Err(::rand::Error::new("entropy pool exhausted"))
        }
    }

    impl CryptoRng for ExhaustedRng {}

    /// A source that fills every buffer with the same byte.
    pub(crate) struct ConstRng(pub(crate) u8);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), ::rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ConstRng {}

    /// Serves `repeats` constant fills, then defers to a seeded generator.
    pub(crate) struct ScriptedRng {
        constant: ConstRng,
        repeats: usize,
        inner: StdRng,
        pub(crate) fills: usize,
    }

    impl ScriptedRng {
        pub(crate) fn new(byte: u8, repeats: usize, seed: u64) -> Self {
            Self {
                constant: ConstRng(byte),
                repeats,
                inner: StdRng::seed_from_u64(seed),
                fills: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.fills += 1;
            if self.fills <= self.repeats {
                self.constant.fill_bytes(dest);
            } else {
                self.inner.fill_bytes(dest);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), ::rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}

    #[test]
    fn random_bits_respects_width() {
        let mut rng = StdRng::seed_from_u64(7);
        for bits in [1usize, 7, 8, 9, 63, 130] {
            let value = random_bits(bits, &mut rng).unwrap();
            assert!(value.bits() <= bits);
        }
    }

    #[test]
    fn random_below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let bound = BigUint::from(1000u32);

        for _ in 0..200 {
            let r = random_below(&bound, &mut rng).unwrap();
            assert!(!r.is_zero());
            assert!(r < bound);
        }
    }

    #[test]
    fn random_below_gives_up_on_a_stuck_source() {
        let result = random_below(&BigUint::from(1000u32), &mut ConstRng(0));

        assert!(
            matches!(
                &result,
                Err(Error::EncryptionFailed(msg)) if msg.starts_with("Exhausted attempts")
            ),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn constant_source_repeats_the_same_prime() {
        let p1 = random_prime(32, &mut ConstRng(0xaa)).unwrap();
        let p2 = random_prime(32, &mut ConstRng(0xaa)).unwrap();

        assert_eq!(p1, p2);
        assert_eq!(p1.bits(), 32);
    }

    #[test]
    fn random_below_rejects_trivial_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_below(&BigUint::one(), &mut rng).is_err());
    }

    #[test]
    fn generates_prime_of_exact_size() {
        let mut rng = StdRng::seed_from_u64(42);
        for bits in [16usize, 64, 256] {
            let p = random_prime(bits, &mut rng).unwrap();

            assert_eq!(p.bits(), bits, "Wrong bit length");
            assert_eq!(&p >> (bits - 2), BigUint::from(3u32), "Top two bits must be set");
            assert_eq!(&p % 2u32, BigUint::one(), "p must be odd");
            assert!(probably_prime(&p, 20), "p is not prime");
        }
    }

    #[test]
    fn rejects_small_prime_sizes() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(random_prime(8, &mut rng), Err(Error::KeyGenerationFailed(_))));
    }

    #[test]
    fn generated_primes_are_distinct() {
        let mut rng = StdRng::seed_from_u64(5);
        let p1 = random_prime(128, &mut rng).unwrap();
        let p2 = random_prime(128, &mut rng).unwrap();
        assert_ne!(p1, p2, "Should generate different primes");
    }

    #[test]
    fn sieve_keeps_small_primes_themselves() {
        assert!(!has_small_factor(&BigUint::from(131u32)));
        assert!(has_small_factor(&BigUint::from(131u32 * 3)));
        assert!(!has_small_factor(&BigUint::from(65_537u32)));
    }

    #[test]
    fn exhausted_source_is_reported() {
        let mut rng = ExhaustedRng;

        assert!(matches!(
            random_prime(64, &mut rng),
            Err(Error::KeyGenerationFailed(_))
        ));
        assert!(matches!(
            random_below(&BigUint::from(1000u32), &mut rng),
            Err(Error::EncryptionFailed(_))
        ));
    }
}
