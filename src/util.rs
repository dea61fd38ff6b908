// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modular arithmetic helpers shared by key generation, encryption and
//! decryption. All functions are pure and operate on exact integers.

pub(crate) mod rand;

use num_bigint_dig::{BigUint, ModInverse};
use num_integer::Integer;
use num_traits::{CheckedSub, Zero};

use crate::{Error, Result};

/// Computes `base^exponent mod modulus`.
///
/// `modulus` must be non-zero.
#[inline]
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(!modulus.is_zero(), "modulus must be nonzero");
    base.modpow(exponent, modulus)
}

/// Computes a⁻¹ mod b.
///
/// Returns [`Error::NoInverseExists`] when `gcd(a, b) != 1`.
pub fn mod_inverse(a: &BigUint, b: &BigUint) -> Result<BigUint> {
    a.mod_inverse(b)
        .ok_or(Error::NoInverseExists)?
        .to_biguint()
        .ok_or(Error::NoInverseExists)
}

/// L(x) = (x - 1) / n
///
/// The division is exact whenever `x ≡ 1 (mod n)`, which holds for
/// `x = c^λ mod n²` by construction. Returns `None` for `x == 0`, where the
/// function has no value over the naturals.
#[inline]
pub fn l_function(x: &BigUint, n: &BigUint) -> Option<BigUint> {
    debug_assert!(!n.is_zero(), "n must be nonzero in L function");

    x.checked_sub(&BigUint::from(1u32)).map(|x_minus_1| x_minus_1 / n)
}

/// lcm(a, b) = a·b / gcd(a, b)
#[inline]
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

/// Converts a [`BigUint`] into its minimal big-endian byte form.
///
/// Zero maps to the empty byte string, so `b""` and `b"\x00"` both decode to
/// the same value and always encode back to `b""`.
pub fn biguint_to_bytes_minimal(m: &BigUint) -> Vec<u8> {
    if m.is_zero() {
        return Vec::new();
    }
    m.to_bytes_be()
}
