// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decrypt, Encrypt, Homomorphic};
use crate::error::{Error, Result};
use crate::util::{self, rand::MIN_PRIME_BITS};

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Smallest modulus size accepted by [`generate_key`]: two 16-bit primes.
pub const MIN_BIT_LENGTH: usize = 2 * MIN_PRIME_BITS;

/// Key generation retries after a degenerate prime pair.
const MAX_KEYGEN_ATTEMPTS: usize = 32;

/// Public parameters of the cryptosystem.
///
/// The modulus is `n = pq`. The generator is fixed to `g = n + 1` and `n²`
/// is cached because every operation reduces modulo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
}

impl PublicKey {
    /// Construct a public key from its modulus.
    ///
    /// `g` and `n²` are derived. The modulus must be greater than one; its
    /// factorization is not verified.
    pub fn new(n: BigUint) -> Result<Self> {
        if n <= BigUint::one() {
            return Err(Error::InvalidPublicKey);
        }

        let g = &n + BigUint::one();
        let n_squared = &n * &n;

        Ok(Self { n, g, n_squared })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the generator `g = n + 1`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return the cached `n²`.
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Return the bit length of the modulus.
    pub fn bits(&self) -> usize {
        self.n.bits()
    }

    /// Computes `g^k mod n²`.
    ///
    /// With `g = 1 + n` the binomial theorem gives
    /// `g^k ≡ 1 + (k mod n)·n (mod n²)`, which avoids a full exponentiation.
    pub(crate) fn g_pow(&self, k: &BigUint) -> BigUint {
        (BigUint::one() + (k % &self.n) * &self.n) % &self.n_squared
    }
}

/// Secret key material.
///
/// Holds the trapdoor `λ = lcm(p-1, q-1)` and `μ = λ⁻¹ mod n`, and embeds its
/// public key so it can both encrypt and decrypt. The factors of `n` are not
/// kept. Sensitive fields are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,
    pub(crate) lambda: BigUint,
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its public key and `λ`.
    ///
    /// Derives `μ = λ⁻¹ mod n`; fails with [`Error::NoInverseExists`] when
    /// `λ` is not invertible modulo `n`.
    pub fn new(public_key: PublicKey, lambda: BigUint) -> Result<Self> {
        if lambda.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }

        let mu = util::mod_inverse(&lambda, public_key.n())?;

        Ok(Self { public_key, lambda, mu })
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Generate a key pair whose modulus is exactly `bit_length` bits, rounded
/// down to an even size.
///
/// Two distinct primes of `bit_length / 2` bits each are drawn from `rng`,
/// both with their top two bits set.
/// Prime pairs that are equal or violate `gcd(n, (p-1)(q-1)) = 1` are
/// discarded and redrawn within a bounded budget. Randomness failures and an
/// exhausted budget both surface as [`Error::KeyGenerationFailed`]; no partial
/// key is ever returned.
pub fn generate_key<R>(rng: &mut R, bit_length: usize) -> Result<(PublicKey, PrivateKey)>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if bit_length < MIN_BIT_LENGTH {
        return Err(Error::InvalidKeySize { min: MIN_BIT_LENGTH, actual: bit_length });
    }

    let prime_bits = bit_length / 2;

    for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
        let p = Zeroizing::new(util::rand::random_prime(prime_bits, rng)?);
        let q = Zeroizing::new(util::rand::random_prime(prime_bits, rng)?);

        if *p == *q {
            tracing::debug!(attempt, "drew identical primes, retrying");
            continue;
        }

        let p_minus_1 = Zeroizing::new(&*p - 1u32);
        let q_minus_1 = Zeroizing::new(&*q - 1u32);
        let n = &*p * &*q;

        // Validity condition for the simplified generator g = n + 1.
        let phi = Zeroizing::new(&*p_minus_1 * &*q_minus_1);
        if !n.gcd(&phi).is_one() {
            tracing::debug!(attempt, "gcd(n, phi) != 1, retrying");
            continue;
        }

        let lambda = util::lcm(&p_minus_1, &q_minus_1);

        let public_key = PublicKey::new(n)
            .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;
        let private_key = PrivateKey::new(public_key.clone(), lambda)
            .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;

        return Ok((public_key, private_key));
    }

    Err(Error::KeyGenerationFailed(format!(
        "No suitable prime pair after {MAX_KEYGEN_ATTEMPTS} attempts"
    )))
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Split into the public and private halves.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public.clone(), self.secret.clone())
    }
}

impl Encrypt for KeyPair {
    fn encrypt<R, P>(&self, rng: &mut R, plaintext: P) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
        P: AsRef<[u8]>,
    {
        self.public.encrypt(rng, plaintext)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        self.secret.decrypt(ciphertext)
    }
}

impl Homomorphic for KeyPair {
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        self.public.add_cipher(c1, c2)
    }

    fn add<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        self.public.add(ciphertext, constant)
    }

    fn mul<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext {
        self.public.mul(ciphertext, constant)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug)]
pub struct KeyPairBuilder {
    bit_length: usize,
}

impl KeyPairBuilder {
    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self { bit_length: Self::MIN_SECURE_BITS }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Generate the key pair using the operating system's randomness.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair using the supplied randomness source.
    pub fn build_with_rng<R>(self, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if self.bit_length < Self::MIN_SECURE_BITS {
            tracing::warn!(
                bit_length = self.bit_length,
                recommended = Self::MIN_SECURE_BITS,
                "generating a cryptographically weak key"
            );
        }

        let (public, secret) = generate_key(rng, self.bit_length)?;
        Ok(KeyPair { public, secret })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
