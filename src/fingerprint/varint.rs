use crate::fingerprint::FingerprintError;

use std::io::Read;

const MAX_VARINT32_BYTES: usize = 5;

/// Reads a variable-length unsigned integer of at most 32 bits.
///
/// Each byte carries 7 bits of payload, least significant group first; a set
/// high bit means another byte follows.
///
/// # Arguments
///
/// * `reader` - The source positioned at the first byte of the integer.
///
/// # Returns
///
/// The decoded value, `FingerprintError::Io` if the source ends early, or
/// `FingerprintError::VarintOverflow` if no terminating byte appears in time.
pub fn read_varint32<R: Read>(reader: &mut R) -> Result<u32, FingerprintError> {
    let mut result: u32 = 0;
    for index in 0..MAX_VARINT32_BYTES {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;
        result |= u32::from(byte[0] & 0x7F) << (7 * index);
        if byte[0] & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(FingerprintError::VarintOverflow)
}

/// Appends `value` to `out` in the encoding read by [`read_varint32`].
pub fn write_varint32(out: &mut Vec<u8>, mut value: u32) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}
