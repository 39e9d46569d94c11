//! Compare the symbols module by module with the `qrcode` crate.
//!
//! Both encoders are forced to the same parameters: byte mode, error
//! correction level L and the checkerboard mask.
use crypax_qr::{QrCode, Version};
use pretty_assertions::assert_eq;
use qrcode::canvas::{Canvas, MaskPattern};
use qrcode::types::{Color, EcLevel};

fn reference(data: &[u8], version: Version) -> Vec<bool> {
    let version = qrcode::Version::Normal(version.number() as i16);
    let mut bits = qrcode::bits::Bits::new(version);
    bits.push_byte_data(data).unwrap();
    bits.push_terminator(EcLevel::L).unwrap();
    let (data_cw, ec_cw) =
        qrcode::ec::construct_codewords(&bits.into_bytes(), version, EcLevel::L).unwrap();
    let mut canvas = Canvas::new(version, EcLevel::L);
    canvas.draw_all_functional_patterns();
    canvas.draw_data(&data_cw, &ec_cw);
    canvas.apply_mask(MaskPattern::Checkerboard);
    canvas.into_colors().into_iter().map(|c| c == Color::Dark).collect()
}

fn modules(code: &QrCode) -> Vec<bool> {
    let bitmap = code.bitmap();
    (0..bitmap.height())
        .flat_map(|y| (0..bitmap.width()).map(move |x| (x, y)))
        .map(|(x, y)| *bitmap.get(x, y).unwrap())
        .collect()
}

fn assert_same(data: &[u8]) {
    let code = QrCode::encode(data).unwrap();
    let expected = reference(data, code.version());
    let actual = modules(&code);
    assert_eq!(actual.len(), expected.len());
    let w = code.width();
    let diff: Vec<(usize, usize)> = (0..actual.len())
        .filter(|&i| actual[i] != expected[i])
        .map(|i| (i % w, i / w))
        .collect();
    assert_eq!(diff, vec![], "{:?}, {} bytes", code.version(), data.len());
}

#[test]
fn test_short_payloads() {
    assert_same(b"");
    assert_same(b"hi");
    assert_same(b"ethereum:0x0");
    assert_same("Grüße".as_bytes());
}

#[test]
fn test_payment_uri() {
    let uri = crypax_qr::uri::eip681_uri(
        "0x71C7656EC7ab88b098defB751B7401B5f6d8976F",
        crypax_qr::uri::U256::from(1_500_000_000_000_000_000u64),
        8453,
    );
    assert_same(uri.as_bytes());
}

#[test]
fn test_every_version_at_capacity() {
    for v in Version::all() {
        let data: Vec<u8> = (0..v.capacity()).map(|i| (i * 7 % 256) as u8).collect();
        let code = QrCode::encode(&data).unwrap();
        assert_eq!(code.version(), v);
        assert_same(&data);
    }
}

#[test]
fn test_every_version_one_byte_over() {
    for v in Version::all().take(9) {
        let data = vec![b'w'; v.capacity() + 1];
        let code = QrCode::encode(&data).unwrap();
        assert_eq!(code.version().number(), v.number() + 1);
        assert_same(&data);
    }
}
