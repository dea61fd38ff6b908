// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decrypt, Encrypt, Homomorphic};
use crate::error::Result;
use crate::keypair::{self, PrivateKey, PublicKey};

/// Byte-oriented entry points.
///
/// Every integer crosses this interface as an unsigned big-endian byte
/// string: leading zeros are accepted on input and the minimal encoding is
/// produced on output. Plaintexts and ciphertexts share that representation,
/// so keeping them apart is the caller's job; the trait API on the key types
/// uses [`Ciphertext`] instead.
pub struct Paillier;

impl Paillier {
    /// Generates a key pair with a modulus of exactly `bit_length` bits, rounded
    /// down to an even size.
    pub fn generate_key<R>(rng: &mut R, bit_length: usize) -> Result<(PublicKey, PrivateKey)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        keypair::generate_key(rng, bit_length)
    }

    /// Encrypts `plaintext`, drawing the nonce from `rng`.
    pub fn encrypt<R>(pub_key: &PublicKey, rng: &mut R, plaintext: &[u8]) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        Ok(pub_key.encrypt(rng, plaintext)?.to_bytes())
    }

    /// Decrypts `ciphertext`.
    ///
    /// The input is not checked for membership in `ℤ*_{n²}`; malformed
    /// ciphertexts yield an unspecified plaintext rather than an error.
    pub fn decrypt(priv_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        priv_key.decrypt(&Ciphertext::from_bytes(ciphertext))
    }

    /// Returns a ciphertext of the sum of the two encrypted plaintexts.
    pub fn add_cipher(pub_key: &PublicKey, c1: &[u8], c2: &[u8]) -> Vec<u8> {
        pub_key
            .add_cipher(&Ciphertext::from_bytes(c1), &Ciphertext::from_bytes(c2))
            .to_bytes()
    }

    /// Returns a ciphertext of the encrypted plaintext plus `constant`.
    pub fn add(pub_key: &PublicKey, ciphertext: &[u8], constant: &[u8]) -> Vec<u8> {
        pub_key.add(&Ciphertext::from_bytes(ciphertext), constant).to_bytes()
    }

    /// Returns a ciphertext of the encrypted plaintext times `constant`.
    pub fn mul(pub_key: &PublicKey, ciphertext: &[u8], constant: &[u8]) -> Vec<u8> {
        pub_key.mul(&Ciphertext::from_bytes(ciphertext), constant).to_bytes()
    }
}
