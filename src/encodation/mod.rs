//! Encoding of the payload into data codewords.
//!
//! Only the byte mode is implemented, payment URIs are short strings
//! where the gain of the numeric or alphanumeric mode does not matter.
mod bits;

#[cfg(test)]
mod tests;

use crate::error::EncodeError;
use crate::version::{Version, TERMINATOR_BITS};
use bits::Bits;

/// Mode indicator of the byte mode.
pub(crate) const MODE_BYTE: u32 = 0b0100;

/// Pad codewords, used alternately to fill the symbol.
pub(crate) const PADDING: [u8; 2] = [0xEC, 0x11];

/// Encode `data` into the smallest version it fits in.
pub(crate) fn encode_auto(data: &[u8]) -> Result<(Vec<u8>, Version), EncodeError> {
    let version = Version::smallest_for(data.len()).ok_or(EncodeError::PayloadTooLarge {
        len: data.len(),
        max: Version::max().capacity(),
    })?;
    tracing::debug!(
        len = data.len(),
        version = version.number(),
        capacity = version.capacity(),
        "Selected symbol version"
    );
    Ok((encode(data, version)?, version))
}

/// Encode `data` into the data codewords of `version`.
pub(crate) fn encode(data: &[u8], version: Version) -> Result<Vec<u8>, EncodeError> {
    if data.len() > version.capacity() {
        return Err(EncodeError::PayloadTooLarge {
            len: data.len(),
            max: version.capacity(),
        });
    }
    let num_codewords = version.num_data_codewords();
    let capacity = num_codewords * 8;

    let mut bits = Bits::with_capacity(num_codewords);
    bits.push(MODE_BYTE, 4);
    bits.push(data.len() as u32, version.char_count_bits());
    for &byte in data {
        bits.push(byte.into(), 8);
    }
    debug_assert_eq!(bits.len(), version.required_bits(data.len()));

    // the terminator may be cut short at the end of the symbol
    let terminator = TERMINATOR_BITS.min(capacity.saturating_sub(bits.len()));
    bits.push(0, terminator);
    bits.align_to_byte();

    let mut codewords = bits.into_bytes();
    let missing = num_codewords.saturating_sub(codewords.len());
    codewords.extend(PADDING.iter().cycle().take(missing));
    codewords.truncate(num_codewords);
    Ok(codewords)
}
