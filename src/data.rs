//! Data part encoding
//!
//! The bytes encoded into a QR code consist of two parts,
//! the first part is the actual information one wants to encode,
//! the second part are error correction bytes.
//!
//! The functions in this module can be used to encode
//! the first part, the data part. They are useful if one needs to work on
//! a lower level, for example to compare against another encoder.
pub use crate::error::EncodeError;
use crate::{encodation, Version};

/// Encode input to the data codewords of the smallest version it fits in.
pub fn encode_data(data: &[u8]) -> Result<(Vec<u8>, Version), EncodeError> {
    encodation::encode_auto(data)
}

/// Encode input to the data codewords of the given version.
///
/// Fails with [EncodeError::PayloadTooLarge] if the data does not fit.
pub fn encode_data_with_version(data: &[u8], version: Version) -> Result<Vec<u8>, EncodeError> {
    encodation::encode(data, version)
}

#[test]
fn test_encode_data_with_version() {
    let cw = encode_data_with_version(b"hi", Version::V2).unwrap();
    assert_eq!(cw.len(), 34);
    assert_eq!(&cw[..4], &[0x40, 0x26, 0x86, 0x90][..]);

    let (auto, version) = encode_data(b"hi").unwrap();
    assert_eq!(version, Version::V1);
    assert_eq!(auto, encode_data_with_version(b"hi", Version::V1).unwrap());
}

#[test]
fn test_encode_data_with_version_too_large() {
    let data = [b'a'; 33];
    assert_eq!(
        encode_data_with_version(&data, Version::V2),
        Err(EncodeError::PayloadTooLarge { len: 33, max: 32 })
    );
    assert!(encode_data_with_version(&data, Version::V3).is_ok());
    assert_eq!(
        encode_data(&[0; 300]),
        Err(EncodeError::PayloadTooLarge { len: 300, max: 271 })
    );
}
