// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;

use crate::util;

/// A Paillier ciphertext, an element of `ℤ*_{n²}`.
///
/// The wrapper keeps ciphertexts apart from plaintext byte strings at the
/// type level. It carries no reference to the key it was produced under, and
/// values decoded from bytes are not checked for group membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    /// Decode a ciphertext from unsigned big-endian bytes.
    ///
    /// Leading zero bytes are accepted and ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_inner(self) -> BigUint {
        self.value
    }

    /// Minimal unsigned big-endian encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        util::biguint_to_bytes_minimal(&self.value)
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> From<T> for Ciphertext
where
    T: AsRef<[u8]>,
{
    fn from(data: T) -> Self {
        Self::from_bytes(data.as_ref())
    }
}

impl From<Ciphertext> for Vec<u8> {
    fn from(ciphertext: Ciphertext) -> Self {
        ciphertext.to_bytes()
    }
}
