use pretty_assertions::assert_eq;

use super::{encode, encode_auto, PADDING};
use crate::error::EncodeError;
use crate::version::Version;

#[test]
fn test_short_payload() {
    let cw = encode(b"hi", Version::V1).unwrap();
    #[rustfmt::skip]
    let expected = vec![
        // 0100 | 0000_0010 | 'h' | 'i' | 0000 terminator
        0x40, 0x26, 0x86, 0x90,
        0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
        0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
    ];
    assert_eq!(cw, expected);
}

#[test]
fn test_empty_payload() {
    let cw = encode(b"", Version::V1).unwrap();
    assert_eq!(cw.len(), 19);
    assert_eq!(&cw[..2], &[0x40, 0x00][..]);
    assert_eq!(cw[2], PADDING[0]);
    assert_eq!(cw[3], PADDING[1]);
}

#[test]
fn test_sixteen_bit_count() {
    let cw = encode(b"A", Version::V10).unwrap();
    // 0100 | 0000_0000_0000_0001 | 0100_0001 | 0000
    assert_eq!(&cw[..4], &[0x40, 0x00, 0x14, 0x10][..]);
    assert_eq!(cw[4], PADDING[0]);
    assert_eq!(cw.len(), 274);
}

#[test]
fn test_full_symbol_has_no_padding() {
    let data = [b'x'; 17];
    let cw = encode(&data, Version::V1).unwrap();
    assert_eq!(cw.len(), 19);
    // header nibble shifts the payload by four bits, the terminator fills
    // the last nibble
    assert_eq!(cw[0], 0x41);
    assert_eq!(cw[1], 0x17);
    assert_eq!(cw[18] & 0x0F, 0);
    assert!(!cw.contains(&PADDING[0]));
}

#[test]
fn test_length_matches_every_version() {
    for v in enum_iterator::all::<Version>() {
        let data = vec![b'a'; v.capacity()];
        assert_eq!(encode(&data, v).unwrap().len(), v.num_data_codewords());
        assert_eq!(encode(b"a", v).unwrap().len(), v.num_data_codewords());
    }
}

#[test]
fn test_too_large_for_version() {
    let data = [0u8; 18];
    assert_eq!(
        encode(&data, Version::V1),
        Err(EncodeError::PayloadTooLarge { len: 18, max: 17 })
    );
}

#[test]
fn test_auto_picks_smallest() {
    let (_, v) = encode_auto(b"ethereum:0x0").unwrap();
    assert_eq!(v, Version::V1);
    let (cw, v) = encode_auto(&[b'z'; 18]).unwrap();
    assert_eq!(v, Version::V2);
    assert_eq!(cw.len(), 34);
}

#[test]
fn test_auto_boundary() {
    let (_, v) = encode_auto(&[b'z'; 271]).unwrap();
    assert_eq!(v, Version::V10);
    assert_eq!(
        encode_auto(&[b'z'; 272]),
        Err(EncodeError::PayloadTooLarge { len: 272, max: 271 })
    );
}

#[test]
fn test_utf8_counts_bytes() {
    let text = "Doppelgänger";
    let cw = encode(text.as_bytes(), Version::V1).unwrap();
    // the character count is the number of bytes, ä takes two
    assert_eq!(text.len(), 13);
    assert_eq!(cw[0], 0x40);
    assert_eq!(cw[1] >> 4, 13);
}
