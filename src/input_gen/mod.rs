pub mod bytes;
pub mod limbs;
pub mod sha256_pad;
pub mod signature;

use std::fmt;
use std::str::FromStr;

use log::debug;
use num_bigint::BigUint;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::InputError;
use crate::profile::CircuitProfile;
use limbs::{bytes_to_biguint, reduce, to_limb_strings};
use sha256_pad::sha256_pad;

/// Which downstream circuit the record is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitType {
    Rsa,
    Sha,
    Test,
    Email,
}

impl FromStr for CircuitType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rsa" => Ok(Self::Rsa),
            "sha" => Ok(Self::Sha),
            "test" => Ok(Self::Test),
            "email" => Ok(Self::Email),
            other => Err(InputError::UnknownCircuitType(other.to_string())),
        }
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rsa => "rsa",
            Self::Sha => "sha",
            Self::Test => "test",
            Self::Email => "email",
        };
        f.write_str(name)
    }
}

/// One record per circuit type, each variant carrying exactly the fields its
/// circuit declares. Serialized as a flat field-name-to-value map; the field
/// names are a persisted contract with the circuit compiler and must not
/// change. Byte buffers and limbs are decimal strings because the circuit's
/// numeric literals are decimal field elements.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CircuitInputs {
    Rsa {
        modulus: Vec<String>,
        signature: Vec<String>,
        base_message: Vec<String>,
    },
    Email {
        modulus: Vec<String>,
        signature: Vec<String>,
        in_padded: Vec<String>,
        in_len_padded_bytes: String,
        in_body_padded: Vec<String>,
        in_body_len_padded_bytes: String,
        body_hash_idx: String,
    },
    Sha {
        in_padded: Vec<String>,
        in_len_padded_bytes: String,
    },
    Test {},
}

impl CircuitInputs {
    /// The record in the serialized form the proving toolchain reads.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Assembles the input record for `circuit` from a verified signature,
/// modulus, signed header bytes, body bytes and the claimed body hash.
///
/// The header and body are padded to the profile's fixed buffer sizes, the
/// unpadded header is hashed and the digest reduced into the scalar field,
/// and the RSA-domain values are limb-encoded at full precision. For the
/// email circuit the claimed body hash must occur verbatim in the header
/// (DKIM places it in the `bh=` tag); its byte offset becomes part of the
/// record, and absence is an error, not a sentinel.
pub fn generate_circuit_inputs(
    signature: &BigUint,
    modulus: &BigUint,
    header: &[u8],
    body: &[u8],
    body_hash: &str,
    circuit: CircuitType,
    profile: &CircuitProfile,
) -> Result<CircuitInputs, InputError> {
    debug!("assembling {} circuit inputs", circuit);

    let (header_padded, header_true_len) = sha256_pad(header, profile.max_header_bytes)?;
    let (body_padded, body_true_len) = sha256_pad(body, profile.max_body_bytes)?;

    let digest = Sha256::digest(header);
    let reduced_digest = reduce(&bytes_to_biguint(&digest), &profile.field_modulus);

    let modulus = to_limb_strings(modulus, profile.limb_bits, profile.num_limbs)?;
    let signature = to_limb_strings(signature, profile.limb_bits, profile.num_limbs)?;
    let base_message = to_limb_strings(&reduced_digest, profile.limb_bits, profile.num_limbs)?;

    match circuit {
        CircuitType::Rsa => Ok(CircuitInputs::Rsa {
            modulus,
            signature,
            base_message,
        }),
        CircuitType::Email => {
            let body_hash_idx = find_subslice(header, body_hash.as_bytes())
                .ok_or(InputError::BodyHashNotFound)?;
            debug!("claimed body hash found at header offset {}", body_hash_idx);
            Ok(CircuitInputs::Email {
                modulus,
                signature,
                in_padded: to_decimal_bytes(&header_padded),
                in_len_padded_bytes: header_true_len.to_string(),
                in_body_padded: to_decimal_bytes(&body_padded),
                in_body_len_padded_bytes: body_true_len.to_string(),
                body_hash_idx: body_hash_idx.to_string(),
            })
        }
        CircuitType::Sha => Ok(CircuitInputs::Sha {
            in_padded: to_decimal_bytes(&header_padded),
            in_len_padded_bytes: header_true_len.to_string(),
        }),
        CircuitType::Test => Ok(CircuitInputs::Test {}),
    }
}

fn to_decimal_bytes(buffer: &[u8]) -> Vec<String> {
    buffer.iter().map(|byte| byte.to_string()).collect()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY_HASH: &str = "GxMZQBzvcQnPsvPMJjmCeEyQcp4wDnRxLXDAYg3WTPM=";

    fn test_header() -> Vec<u8> {
        let mut header = b"to:bob@example.com\r\nsubject:hello\r\nbh=".to_vec();
        header.extend_from_slice(BODY_HASH.as_bytes());
        header.extend_from_slice(b";\r\nfrom:alice@example.com\r\n");
        header
    }

    fn test_rsa_values() -> (BigUint, BigUint) {
        (
            bytes_to_biguint(&[0x5au8; 256]),
            bytes_to_biguint(&[0xc3u8; 256]),
        )
    }

    #[test]
    fn test_circuit_type_parsing() {
        assert_eq!("email".parse::<CircuitType>().unwrap(), CircuitType::Email);
        assert_eq!("rsa".parse::<CircuitType>().unwrap(), CircuitType::Rsa);
        assert_eq!(
            "groth16".parse::<CircuitType>(),
            Err(InputError::UnknownCircuitType("groth16".to_string()))
        );
    }

    #[test]
    fn test_email_inputs() {
        let _ = env_logger::builder().is_test(true).try_init();

        let profile = CircuitProfile::bn256();
        let (sig, n) = test_rsa_values();
        let header = test_header();
        let body = b"hello bob\r\n".to_vec();

        let inputs = generate_circuit_inputs(
            &sig,
            &n,
            &header,
            &body,
            BODY_HASH,
            CircuitType::Email,
            &profile,
        )
        .unwrap();

        match inputs {
            CircuitInputs::Email {
                in_padded,
                in_len_padded_bytes,
                in_body_padded,
                in_body_len_padded_bytes,
                body_hash_idx,
                ..
            } => {
                assert_eq!(in_padded.len(), profile.max_header_bytes);
                assert_eq!(in_body_padded.len(), profile.max_body_bytes);
                // 109 byte header, padded out to the next 64 byte block
                assert_eq!(in_len_padded_bytes, "128");
                assert_eq!(in_body_len_padded_bytes, "64");
                // the bh= tag value starts right after the 38 byte prefix
                assert_eq!(body_hash_idx, "38");
                assert_eq!(in_padded[0], "116"); // b't'
            }
            other => panic!("expected an email record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_body_hash() {
        let profile = CircuitProfile::bn256();
        let (sig, n) = test_rsa_values();

        let result = generate_circuit_inputs(
            &sig,
            &n,
            b"to:bob@example.com\r\n",
            b"hello",
            BODY_HASH,
            CircuitType::Email,
            &profile,
        );
        assert_eq!(result, Err(InputError::BodyHashNotFound));

        // the same inputs are fine for circuits that never read the offset
        let result = generate_circuit_inputs(
            &sig,
            &n,
            b"to:bob@example.com\r\n",
            b"hello",
            BODY_HASH,
            CircuitType::Rsa,
            &profile,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_base_message_is_reduced_header_digest() {
        let profile = CircuitProfile::bn256();
        let header = test_header();
        let (n, sig) = signature::sign(&header);

        let inputs = generate_circuit_inputs(
            &sig,
            &n,
            &header,
            b"hello bob\r\n",
            BODY_HASH,
            CircuitType::Rsa,
            &profile,
        )
        .unwrap();

        let base_message = match inputs {
            CircuitInputs::Rsa { base_message, .. } => base_message,
            other => panic!("expected an rsa record, got {:?}", other),
        };
        let expected = reduce(
            &bytes_to_biguint(&Sha256::digest(&header)),
            &profile.field_modulus,
        );
        assert_eq!(
            limbs::limbs_to_biguint(&base_message, profile.limb_bits).unwrap(),
            expected
        );
        assert!(expected < profile.field_modulus);
    }

    #[test]
    fn test_variant_field_sets() {
        let profile = CircuitProfile::bn256();
        let (sig, n) = test_rsa_values();
        let header = test_header();

        let keys = |circuit| {
            let inputs = generate_circuit_inputs(
                &sig, &n, &header, b"hi", BODY_HASH, circuit, &profile,
            )
            .unwrap();
            match serde_json::to_value(&inputs).unwrap() {
                serde_json::Value::Object(map) => {
                    map.keys().cloned().collect::<Vec<_>>()
                }
                other => panic!("expected a map, got {}", other),
            }
        };

        assert_eq!(keys(CircuitType::Sha), ["in_len_padded_bytes", "in_padded"]);
        assert_eq!(
            keys(CircuitType::Rsa),
            ["base_message", "modulus", "signature"]
        );
        assert_eq!(
            keys(CircuitType::Email),
            [
                "body_hash_idx",
                "in_body_len_padded_bytes",
                "in_body_padded",
                "in_len_padded_bytes",
                "in_padded",
                "modulus",
                "signature",
            ]
        );
        assert!(keys(CircuitType::Test).is_empty());
    }

    #[test]
    fn test_determinism() {
        let profile = CircuitProfile::bn256();
        let (sig, n) = test_rsa_values();
        let header = test_header();

        let run = || {
            let inputs = generate_circuit_inputs(
                &sig,
                &n,
                &header,
                b"hello bob\r\n",
                BODY_HASH,
                CircuitType::Email,
                &profile,
            )
            .unwrap();
            inputs.to_json().unwrap()
        };
        assert_eq!(run(), run());
    }
}
