use num_bigint::BigUint;
use rsa::pkcs1v15::SigningKey;
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

const KEY_BITS: usize = 2048;

/// Signs `data` with a throwaway 2048-bit key, PKCS#1 v1.5 over SHA-256 (the
/// scheme DKIM uses). Returns `(modulus, signature)`. Tests and benches use
/// this in place of a real DKIM-verified email.
pub fn sign(data: &[u8]) -> (BigUint, BigUint) {
    let mut rng = rand_core::OsRng;

    let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS).expect("failed to generate a key");
    let signing_key = SigningKey::<Sha256>::new(private_key.clone());

    let sig = signing_key.sign_with_rng(&mut rng, data);
    let pk = private_key.to_public_key();

    (
        BigUint::from_bytes_be(&pk.n().to_bytes_be()),
        BigUint::from_bytes_be(&sig.to_bytes()),
    )
}

#[test]
fn test_signature_opens_to_digest() {
    use sha2::{Digest, Sha256 as Hash};

    // s^e mod n recovers the EMSA-PKCS1-v1_5 encoding, whose trailing 32
    // bytes are the SHA-256 digest of the signed data.
    let data = b"hello";
    let (n, sig) = sign(data);
    let em = sig.modpow(&BigUint::from(65537u32), &n);
    let em_bytes = em.to_bytes_be();
    let digest = Hash::digest(data);
    assert_eq!(&em_bytes[em_bytes.len() - 32..], digest.as_slice());
}
