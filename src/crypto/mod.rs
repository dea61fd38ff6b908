mod decrypt;
mod encrypt;
mod homomorphic;

use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Encrypts a single plaintext.
pub trait Encrypt {
    /// Encrypt a plaintext given as an unsigned big-endian integer.
    ///
    /// The nonce is drawn from `rng`, so two encryptions of the same value
    /// differ. Plaintexts at or above `n` are reduced modulo `n` without
    /// notice.
    ///
    /// ## Error
    ///
    /// Fails with [`Error::EncryptionFailed`](crate::Error::EncryptionFailed)
    /// if the randomness source fails.
    fn encrypt<R, P>(&self, rng: &mut R, plaintext: P) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
        P: AsRef<[u8]>;
}

/// Decrypts a single ciphertext into its plaintext representation.
pub trait Decrypt {
    /// Recover the plaintext `m` from a ciphertext `c`.
    ///
    /// The result is the minimal big-endian encoding of `m`; zero decrypts to
    /// an empty vector.
    ///
    /// The ciphertext is not checked against `n²` or for membership in
    /// `ℤ*_{n²}`; malformed input decrypts to an unspecified plaintext.
    ///
    /// ## Error
    ///
    /// Fails with [`Error::DecryptionFailed`](crate::Error::DecryptionFailed)
    /// only when `c^λ mod n² = 0`, as for an empty ciphertext or any multiple
    /// of `n`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>>;
}

/// Operations on ciphertexts that need only the public modulus.
///
/// Constants are unsigned big-endian integers. All results are reduced
/// modulo `n²` and decrypt to results reduced modulo `n`.
pub trait Homomorphic {
    /// Returns a ciphertext of `m₁ + m₂`.
    fn add_cipher(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext;

    /// Returns a ciphertext of `m + k`.
    fn add<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext;

    /// Returns a ciphertext of `m · k`.
    fn mul<K: AsRef<[u8]>>(&self, ciphertext: &Ciphertext, constant: K) -> Ciphertext;
}


#[cfg(test)]
mod test_decryption {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::Error;
    use crate::keypair::generate_key;

    use num_bigint_dig::BigUint;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_keys() -> (StdRng, crate::PublicKey, crate::PrivateKey) {
        let mut rng = StdRng::seed_from_u64(0xdec);
        let (public, private) = generate_key(&mut rng, 256).unwrap();
        (rng, public, private)
    }

    #[test]
    fn zero_message() {
        let (mut rng, public, private) = create_test_keys();

        let c = public.encrypt(&mut rng, b"").unwrap();
        let decrypted = private.decrypt(&c).unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn leading_zero_bytes_are_stripped() {
        let (mut rng, public, private) = create_test_keys();

        let c = public.encrypt(&mut rng, [0u8, 0, 0x12, 0x34]).unwrap();
        assert_eq!(private.decrypt(&c).unwrap(), vec![0x12, 0x34]);
    }

    #[test]
    fn max_plaintext() {
        let (mut rng, public, private) = create_test_keys();

        let max = public.n() - 1u32;
        let c = public.encrypt(&mut rng, max.to_bytes_be()).unwrap();

        assert_eq!(private.decrypt(&c).unwrap(), max.to_bytes_be());
    }

    #[test]
    fn ciphertext_roundtrips_through_bytes() {
        let (mut rng, public, private) = create_test_keys();

        let c = public.encrypt(&mut rng, b"bytes").unwrap();
        let restored = Ciphertext::from(c.to_bytes());

        assert_eq!(private.decrypt(&restored).unwrap(), b"bytes".to_vec());
    }

    #[test]
    fn oversized_ciphertext_is_not_rejected() {
        let (mut rng, public, private) = create_test_keys();

        let c = public.encrypt(&mut rng, [9u8]).unwrap();
        let shifted = Ciphertext::new(c.value() + public.n_squared());

        assert_eq!(private.decrypt(&shifted).unwrap(), vec![9u8]);
    }

    #[test]
    fn vanishing_ciphertext_fails() {
        let (_, public, private) = create_test_keys();

        let empty = Ciphertext::from_bytes(&[]);
        assert!(matches!(private.decrypt(&empty), Err(Error::DecryptionFailed(_))));

        let multiple_of_n = Ciphertext::new(public.n().clone());
        assert!(matches!(private.decrypt(&multiple_of_n), Err(Error::DecryptionFailed(_))));
    }

    #[test]
    fn keys_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<crate::PublicKey>();
        assert_send_sync::<crate::PrivateKey>();

        let (_, public, private) = create_test_keys();

        std::thread::scope(|scope| {
            for seed in 0..4u64 {
                let public = &public;
                let private = &private;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let m = BigUint::from(seed * 1000 + 7);

                    let c = public.encrypt(&mut rng, m.to_bytes_be()).unwrap();
                    let d = private.decrypt(&c).unwrap();

                    assert_eq!(BigUint::from_bytes_be(&d), m);
                });
            }
        });
    }
}
