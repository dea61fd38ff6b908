#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::OnceLock;

use paillier::{Decrypt, Encrypt, KeyPair, KeyPairBuilder};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let key_pair = KEYPAIR.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(1);
        KeyPairBuilder::new().bit_length(128).build_with_rng(&mut rng).unwrap()
    });

    let mut rng = StdRng::seed_from_u64(data.len() as u64);

    let ciphertext = match key_pair.encrypt(&mut rng, data) {
        Ok(ct) => ct,
        Err(e) => panic!("Encryption failed with a healthy randomness source: {e}"),
    };

    let decrypted_bytes = match key_pair.decrypt(&ciphertext) {
        Ok(pt) => pt,
        Err(_) => {
            panic!("Decryption failed for valid ciphertext! Input was: {:?}", data);
        }
    };

    // Plaintexts alias modulo n
    let original = BigUint::from_bytes_be(data) % key_pair.public_key().n();
    let decrypted = BigUint::from_bytes_be(&decrypted_bytes);

    assert_eq!(
        original, decrypted,
        "Plaintext mismatch!\nInput bytes: {:?}\nDecrypted bytes: {:?}\nExpected: {}\nGot: {}",
        data, decrypted_bytes, original, decrypted
    );
});
