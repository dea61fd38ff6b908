#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{Paillier, PrivateKey, PublicKey};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::OnceLock;

static KEYS: OnceLock<(PublicKey, PrivateKey)> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let (pub_key, priv_key) = KEYS.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(2);
        Paillier::generate_key(&mut rng, 256).unwrap()
    });

    // Arbitrary bytes as a ciphertext: any result is acceptable, a panic is not.
    let _ = Paillier::decrypt(priv_key, data);

    let n = pub_key.n();
    let plaintext = BigUint::from_bytes_be(data) % n;

    let mut rng = StdRng::seed_from_u64(data.len() as u64);
    let Ok(ciphertext) = Paillier::encrypt(pub_key, &mut rng, &plaintext.to_bytes_be()) else {
        return;
    };
    let Ok(decrypted) = Paillier::decrypt(priv_key, &ciphertext) else {
        panic!("Decryption failed for valid ciphertext");
    };

    assert_eq!(plaintext, BigUint::from_bytes_be(&decrypted));
});
