use num_bigint::BigUint;
use num_integer::Integer;

use crate::error::InputError;

/// Big-endian bytes as a non-negative arbitrary-precision integer.
pub fn bytes_to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Splits `value` into `num_limbs` chunks of `limb_bits` bits each, least
/// significant chunk first, every chunk rendered in base 10. The consuming
/// circuit reads its numeric literals as decimal field elements, and its
/// wires are statically sized, so the limb count is fixed and short values
/// are zero-padded. A value wider than `limb_bits * num_limbs` is rejected.
pub fn to_limb_strings(
    value: &BigUint,
    limb_bits: u32,
    num_limbs: usize,
) -> Result<Vec<String>, InputError> {
    let capacity = limb_bits as u64 * num_limbs as u64;
    if value.bits() > capacity {
        return Err(InputError::ValueTooWide {
            bits: value.bits(),
            limbs: num_limbs,
            limb_bits,
        });
    }

    let base = BigUint::from(1u8) << (limb_bits as usize);
    let mut rest = value.clone();
    let mut limbs = Vec::with_capacity(num_limbs);
    for _ in 0..num_limbs {
        let (quotient, limb) = rest.div_rem(&base);
        limbs.push(limb.to_str_radix(10));
        rest = quotient;
    }
    Ok(limbs)
}

/// Inverse of [`to_limb_strings`]: `sum(limb_i * 2^(limb_bits * i))`.
pub fn limbs_to_biguint(limbs: &[String], limb_bits: u32) -> Result<BigUint, InputError> {
    let mut value = BigUint::from(0u8);
    for (i, limb) in limbs.iter().enumerate() {
        let limb_value = BigUint::parse_bytes(limb.as_bytes(), 10)
            .ok_or_else(|| InputError::MalformedLimb(limb.clone()))?;
        value += limb_value << (limb_bits as usize * i);
    }
    Ok(value)
}

/// Reduction into the circuit's scalar field. Applied to digest values only;
/// RSA-domain values keep full precision, reducing them would corrupt the
/// relation being proved.
pub fn reduce(value: &BigUint, modulus: &BigUint) -> BigUint {
    value % modulus
}

#[cfg(test)]
use crate::profile::{LIMB_BITS, NUM_LIMBS};

#[test]
fn test_round_trip_small() {
    for v in [0u32, 1, 255, 65537] {
        let value = BigUint::from(v);
        let limbs = to_limb_strings(&value, LIMB_BITS, NUM_LIMBS).unwrap();
        assert_eq!(limbs.len(), NUM_LIMBS);
        assert_eq!(limbs_to_biguint(&limbs, LIMB_BITS).unwrap(), value);
    }
}

#[test]
fn test_round_trip_rsa_sized() {
    // 2048-bit value, well beyond machine words
    let value = bytes_to_biguint(&[0xfdu8; 256]);
    assert_eq!(value.bits(), 2048);
    let limbs = to_limb_strings(&value, LIMB_BITS, NUM_LIMBS).unwrap();
    assert_eq!(limbs_to_biguint(&limbs, LIMB_BITS).unwrap(), value);

    let base = BigUint::from(1u8) << (LIMB_BITS as usize);
    for limb in &limbs {
        let limb = BigUint::parse_bytes(limb.as_bytes(), 10).unwrap();
        assert!(limb < base);
    }
}

#[test]
fn test_value_too_wide() {
    let value = BigUint::from(1u8) << (LIMB_BITS as usize * NUM_LIMBS);
    assert_eq!(
        to_limb_strings(&value, LIMB_BITS, NUM_LIMBS),
        Err(InputError::ValueTooWide {
            bits: LIMB_BITS as u64 * NUM_LIMBS as u64 + 1,
            limbs: NUM_LIMBS,
            limb_bits: LIMB_BITS,
        })
    );
}

#[test]
fn test_malformed_limb() {
    let limbs = vec!["12".to_string(), "0x3".to_string()];
    assert!(matches!(
        limbs_to_biguint(&limbs, LIMB_BITS),
        Err(InputError::MalformedLimb(_))
    ));
}

#[test]
fn test_reduce_matches_field_arithmetic() {
    use crate::profile::scalar_field_modulus;
    use ff::{FromUniformBytes, PrimeField};
    use halo2curves::bn256::Fr;
    use sha2::{Digest, Sha256};

    let modulus = scalar_field_modulus();
    let digest = Sha256::digest(b"hello");
    let reduced = reduce(&bytes_to_biguint(&digest), &modulus);
    assert!(reduced < modulus);

    // Same reduction through the field implementation: feed the digest as the
    // low 32 little-endian bytes of a 64-byte wide element.
    let mut wide = [0u8; 64];
    for (i, byte) in digest.iter().rev().enumerate() {
        wide[i] = *byte;
    }
    let expected = Fr::from_uniform_bytes(&wide);
    let got = Fr::from_str_vartime(&reduced.to_str_radix(10)).unwrap();
    assert_eq!(got, expected);
}
