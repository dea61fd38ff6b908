// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Homomorphic;
use crate::ciphertext::Ciphertext;
use crate::keypair::{PrivateKey, PublicKey};
use crate::util;

use num_bigint_dig::BigUint;

impl Homomorphic for PublicKey {
    // E(m₁) · E(m₂) = E(m₁ + m₂)
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext::new((c1.value() * c2.value()) % &self.n_squared)
    }

    // E(m) · g^k = E(m + k)
    fn add<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        let k = BigUint::from_bytes_be(constant.as_ref());
        let gk = self.g_pow(&k);

        Ciphertext::new((ciphertext.value() * gk) % &self.n_squared)
    }

    // E(m)^k = E(m · k)
    fn mul<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        let k = BigUint::from_bytes_be(constant.as_ref());

        Ciphertext::new(util::mod_pow(ciphertext.value(), &k, &self.n_squared))
    }
}

impl Homomorphic for PrivateKey {
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        self.public_key.add_cipher(c1, c2)
    }

    fn add<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        self.public_key.add(ciphertext, constant)
    }

    fn mul<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        self.public_key.mul(ciphertext, constant)
    }
}
