use log::debug;

use super::bytes::{concat, u32_be, u8_byte};
use crate::error::InputError;

/// FIPS 180-4 §5.1.1 message padding, with two deviations the circuit is
/// built around:
///
/// - the bit-length suffix is 4 bytes, not 8, so messages must stay under
///   2^32 bits (longer input is rejected as [`InputError::OversizedInput`]);
/// - after the real padding, the buffer is zero-extended to `max_len` bytes,
///   because the circuit's wires are statically sized.
///
/// Returns the `max_len`-byte buffer together with the true padded length in
/// bytes, the offset at which meaningful data stops. The extension region
/// beyond it is pure zero fill.
pub fn sha256_pad(message: &[u8], max_len: usize) -> Result<(Vec<u8>, usize), InputError> {
    let bit_len = u32::try_from(message.len() as u64 * 8).map_err(|_| {
        InputError::OversizedInput {
            len: message.len(),
            max: max_len,
        }
    })?;
    let length_field = u32_be(bit_len);

    let mut padded = concat(message, &u8_byte(0x80));
    while (padded.len() * 8 + length_field.len() * 8) % 512 != 0 {
        padded = concat(&padded, &u8_byte(0));
    }
    padded = concat(&padded, &length_field);

    if padded.len() * 8 % 512 != 0 {
        return Err(InputError::PaddingInvariant(
            "padded bit length is not a multiple of 512",
        ));
    }
    let true_len = padded.len();
    if true_len > max_len {
        return Err(InputError::OversizedInput {
            len: message.len(),
            max: max_len,
        });
    }

    while padded.len() < max_len {
        padded = concat(&padded, &u32_be(0));
    }
    if padded.len() != max_len {
        return Err(InputError::PaddingInvariant(
            "zero extension overshot the target buffer size",
        ));
    }

    debug!(
        "padded {} byte message to {} bytes, true length {}",
        message.len(),
        max_len,
        true_len
    );
    Ok((padded, true_len))
}

#[test]
fn test_empty_message() {
    let (padded, true_len) = sha256_pad(&[], 64).unwrap();
    assert_eq!(true_len, 64);
    assert_eq!(padded[0], 0x80);
    // 59 zero fill bytes, then a zero 4-byte length field
    assert!(padded[1..].iter().all(|&b| b == 0));
    assert_eq!(padded.len(), 64);
}

#[test]
fn test_55_byte_message() {
    let message = [0xabu8; 55];
    let (padded, true_len) = sha256_pad(&message, 64).unwrap();
    assert_eq!(true_len, 64);
    assert_eq!(&padded[..55], &message[..]);
    assert_eq!(padded[55], 0x80);
    assert_eq!(&padded[56..60], &[0, 0, 0, 0]);
    // 55 * 8 = 440 bits
    assert_eq!(&padded[60..64], &u32_be(440));
}

#[test]
fn test_true_length_is_block_aligned() {
    for len in [0usize, 1, 17, 59, 60, 100, 511, 900] {
        let message = vec![0x61u8; len];
        let (padded, true_len) = sha256_pad(&message, 1024).unwrap();
        assert_eq!(padded.len(), 1024);
        assert_eq!(true_len * 8 % 512, 0, "message of {} bytes", len);
        assert!(padded[true_len..].iter().all(|&b| b == 0));
    }
}

#[test]
fn test_boundary_fit() {
    // 59 bytes is the largest message whose padding fits one 64-byte block:
    // 59 + delimiter = 60, (60 * 8 + 32) % 512 == 0, plus the length field.
    let (_, true_len) = sha256_pad(&[0u8; 59], 64).unwrap();
    assert_eq!(true_len, 64);

    assert_eq!(
        sha256_pad(&[0u8; 60], 64),
        Err(InputError::OversizedInput { len: 60, max: 64 })
    );
}

#[test]
fn test_oversized_message() {
    assert_eq!(
        sha256_pad(&[0u8; 200], 64),
        Err(InputError::OversizedInput { len: 200, max: 64 })
    );
}
