//! Boundary to the external DKIM verifier.
//!
//! Real DKIM verification and public-key parsing are trusted collaborators,
//! not part of this crate. They are modeled as a capability: given raw email
//! bytes, hand back the signature, the signed header bytes, the body, the
//! claimed body hash and the signer's modulus, or fail. The pipeline only
//! ever sees a [`VerifiedEmail`], so tests can drive it with synthetic
//! fixtures.

use num_bigint::BigUint;

use crate::error::InputError;
use crate::input_gen::limbs::bytes_to_biguint;
use crate::input_gen::{generate_circuit_inputs, CircuitInputs, CircuitType};
use crate::profile::CircuitProfile;

/// Output of a successful DKIM verification, already trusted.
#[derive(Clone, Debug)]
pub struct VerifiedEmail {
    /// Raw RSA signature bytes, big-endian.
    pub signature: Vec<u8>,
    /// The exact header bytes the signature covers.
    pub header: Vec<u8>,
    /// Decoded message body.
    pub body: Vec<u8>,
    /// Body hash claimed in the `bh=` tag, as it appears in the header.
    pub body_hash: String,
    /// RSA modulus of the signing domain's public key.
    pub modulus: BigUint,
}

pub trait DkimVerifier {
    fn verify(&self, raw_email: &[u8]) -> Result<VerifiedEmail, InputError>;
}

/// Runs `raw_email` through the verifier and assembles the record for
/// `circuit` from whatever it vouches for.
pub fn inputs_from_email<V: DkimVerifier>(
    verifier: &V,
    raw_email: &[u8],
    circuit: CircuitType,
    profile: &CircuitProfile,
) -> Result<CircuitInputs, InputError> {
    let email = verifier.verify(raw_email)?;
    let signature = bytes_to_biguint(&email.signature);
    generate_circuit_inputs(
        &signature,
        &email.modulus,
        &email.header,
        &email.body,
        &email.body_hash,
        circuit,
        profile,
    )
}
