// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Decrypt;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;
use crate::util;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        let n = self.public_key.n();

        // No range or group-membership check on c: a value outside ℤ*_{n²}
        // decrypts to an unspecified plaintext.
        //
        // m = L(c^λ mod n²) · μ mod n
        let u = util::mod_pow(ciphertext.value(), &self.lambda, self.public_key.n_squared());

        let l_u = util::l_function(&u, n)
            .ok_or_else(|| Error::DecryptionFailed("c^λ vanishes modulo n²".into()))?;

        let m = (l_u * &self.mu) % n;

        Ok(util::biguint_to_bytes_minimal(&m))
    }
}
