use ff::PrimeField;
use halo2curves::bn256::Fr;
use num_bigint::BigUint;

use crate::error::InputError;

/// Padded size of the signed-header buffer, in bytes.
pub const MAX_HEADER_PADDED_BYTES: usize = 1024;
/// Padded size of the body buffer, in bytes.
pub const MAX_BODY_PADDED_BYTES: usize = 1536;
/// Bit width of one limb. 121 * 17 = 2057 bits covers a 2048-bit modulus and
/// keeps every limb below the bn256 scalar field.
pub const LIMB_BITS: u32 = 121;
/// Number of limbs per encoded integer.
pub const NUM_LIMBS: usize = 17;

/// Sizing constants for one circuit build. The downstream constraint system
/// is compiled against fixed wire sizes, so every profile value participates
/// in the persisted input contract; two parties exchanging records must agree
/// on the profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitProfile {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    /// Scalar field modulus of the consuming circuit. Digest values are
    /// reduced below it; RSA-domain values are not.
    pub field_modulus: BigUint,
    pub limb_bits: u32,
    pub num_limbs: usize,
}

impl CircuitProfile {
    /// The profile of the bn256-based circom circuits: 1024-byte header
    /// buffer, 1536-byte body buffer, 17 limbs of 121 bits.
    pub fn bn256() -> Self {
        Self {
            max_header_bytes: MAX_HEADER_PADDED_BYTES,
            max_body_bytes: MAX_BODY_PADDED_BYTES,
            field_modulus: scalar_field_modulus(),
            limb_bits: LIMB_BITS,
            num_limbs: NUM_LIMBS,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.max_header_bytes % 64 != 0 || self.max_header_bytes == 0 {
            return Err(InputError::InvalidProfile(
                "max_header_bytes must be a non-zero multiple of 64",
            ));
        }
        if self.max_body_bytes % 64 != 0 || self.max_body_bytes == 0 {
            return Err(InputError::InvalidProfile(
                "max_body_bytes must be a non-zero multiple of 64",
            ));
        }
        if self.num_limbs == 0 {
            return Err(InputError::InvalidProfile("num_limbs must be non-zero"));
        }
        // A limb must stay representable as a single field element.
        if self.limb_bits as u64 >= self.field_modulus.bits() {
            return Err(InputError::InvalidProfile(
                "limb_bits must be below the field modulus bit length",
            ));
        }
        Ok(())
    }
}

/// The bn256 scalar field modulus as an arbitrary-precision integer.
pub fn scalar_field_modulus() -> BigUint {
    let hex = Fr::MODULUS.trim_start_matches("0x");
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("Fr::MODULUS is valid hex")
}

#[test]
fn test_scalar_field_modulus() {
    // The circom toolchain's field prime, pinned as a decimal literal.
    let expected = BigUint::parse_bytes(
        b"21888242871839275222246405745257275088548364400416034343698204186575808495617",
        10,
    )
    .unwrap();
    assert_eq!(scalar_field_modulus(), expected);
}

#[test]
fn test_default_profile_is_valid() {
    CircuitProfile::bn256().validate().unwrap();
}

#[test]
fn test_unaligned_buffer_rejected() {
    let mut profile = CircuitProfile::bn256();
    profile.max_header_bytes = 100;
    assert!(matches!(
        profile.validate(),
        Err(InputError::InvalidProfile(_))
    ));
}

#[test]
fn test_oversized_limb_rejected() {
    let mut profile = CircuitProfile::bn256();
    profile.limb_bits = 254;
    assert!(matches!(
        profile.validate(),
        Err(InputError::InvalidProfile(_))
    ));
}
