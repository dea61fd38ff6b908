// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{PrivateKey, PublicKey};
use crate::util;

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Nonce draws rejected for sharing a factor with `n` before giving up.
const MAX_NONCE_ATTEMPTS: usize = 64;

impl Encrypt for PublicKey {
    fn encrypt<R, P>(&self, rng: &mut R, plaintext: P) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
        P: AsRef<[u8]>,
    {
        self.encrypt_and_nonce(rng, plaintext).map(|(ciphertext, _)| ciphertext)
    }
}

impl Encrypt for PrivateKey {
    fn encrypt<R, P>(&self, rng: &mut R, plaintext: P) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
        P: AsRef<[u8]>,
    {
        self.public_key.encrypt(rng, plaintext)
    }
}

impl PublicKey {
    /// Encrypt and also return the nonce `r` that was used.
    ///
    /// The nonce lets a holder of the ciphertext prove what it encrypts; it
    /// must be kept as secret as the plaintext.
    pub fn encrypt_and_nonce<R, P>(
        &self,
        rng: &mut R,
        plaintext: P,
    ) -> Result<(Ciphertext, BigUint)>
    where
        R: RngCore + CryptoRng + ?Sized,
        P: AsRef<[u8]>,
    {
        let r = self.sample_nonce(rng)?;
        let m = BigUint::from_bytes_be(plaintext.as_ref());
        let c = self.encrypt_raw(&m, &r);

        Ok((c, r))
    }

    /// Deterministically encrypt under a caller-supplied nonce.
    ///
    /// `r` must lie in `[1, n)` and be coprime to `n`.
    pub fn encrypt_with_nonce<P: AsRef<[u8]>>(
        &self,
        plaintext: P,
        r: &BigUint,
    ) -> Result<Ciphertext> {
        if r.is_zero() || r >= &self.n || !r.gcd(&self.n).is_one() {
            return Err(Error::InvalidNonce);
        }

        let m = BigUint::from_bytes_be(plaintext.as_ref());
        Ok(self.encrypt_raw(&m, r))
    }

    /// Draw `r` from `[1, n)` until it is a unit modulo `n`.
    fn sample_nonce<R>(&self, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        for _ in 0..MAX_NONCE_ATTEMPTS {
            let r = util::rand::random_below(&self.n, rng)?;
            if r.gcd(&self.n).is_one() {
                return Ok(r);
            }
        }

        Err(Error::EncryptionFailed("No nonce coprime to n found".into()))
    }

    // c = g^m · r^n mod n²
    //
    // Plaintexts at or above n alias to m mod n through g_pow.
    fn encrypt_raw(&self, m: &BigUint, r: &BigUint) -> Ciphertext {
        let gm = self.g_pow(m);
        let rn = util::mod_pow(r, &self.n, &self.n_squared);

        Ciphertext::new((gm * rn) % &self.n_squared)
    }
}
