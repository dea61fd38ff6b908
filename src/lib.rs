// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the decisional composite residuosity assumption over `ℤ*_{n²}`.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! ## Homomorphic operations
//!
//! Anyone holding the public key can, without decrypting:
//! - add two encrypted values ([`Homomorphic::add_cipher`]),
//! - add a plaintext constant ([`Homomorphic::add`]),
//! - multiply by a plaintext constant ([`Homomorphic::mul`]).
//!
//! All results are reduced modulo `n`.
//!
//! ## Security
//!
//! Arithmetic is not constant-time, ciphertexts are not authenticated, and
//! decryption does not validate its input. The private key (`λ`, `μ`) is
//! zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use paillier::{Decrypt, Encrypt, Homomorphic, KeyPair};
//! use num_bigint_dig::BigUint;
//! use rand::rngs::OsRng;
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//!
//! let c15 = keypair.encrypt(&mut OsRng, [15u8]).expect("encryption failed");
//! let c20 = keypair.encrypt(&mut OsRng, [20u8]).expect("encryption failed");
//!
//! let sum = keypair.add_cipher(&c15, &c20);
//! let decrypted = keypair.decrypt(&sum).expect("decryption failed");
//! assert_eq!(BigUint::from_bytes_be(&decrypted), BigUint::from(35u32));
//! ```

mod ciphertext;
mod crypto;
mod error;
mod keypair;
mod paillier;
pub mod util;

pub use ciphertext::*;
pub use crypto::*;
pub use error::*;
pub use keypair::*;
pub use paillier::*;
