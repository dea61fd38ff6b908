#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{Ciphertext, Decrypt, Encrypt, Homomorphic, KeyPair, KeyPairBuilder};
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::sync::OnceLock;

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let keypair = KEYPAIR.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(3);
        KeyPairBuilder::new().bit_length(256).build_with_rng(&mut rng).unwrap()
    });
    let n = keypair.public_key().n();

    let (m1_bytes, m2_bytes) = data.split_at(data.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes);
    let m2 = BigUint::from_bytes_be(m2_bytes);

    let mut rng = StdRng::seed_from_u64(data.len() as u64);
    let Ok(c1) = keypair.encrypt(&mut rng, m1_bytes) else {
        return;
    };
    let Ok(c2) = keypair.encrypt(&mut rng, m2_bytes) else {
        return;
    };

    let decrypt = |c: Ciphertext| BigUint::from_bytes_be(&keypair.decrypt(&c).unwrap());

    assert_eq!(decrypt(keypair.add_cipher(&c1, &c2)), (&m1 + &m2) % n);
    assert_eq!(decrypt(keypair.add(&c1, m2_bytes)), (&m1 + &m2) % n);
    assert_eq!(decrypt(keypair.mul(&c1, m2_bytes)), (&m1 * &m2) % n);
});
