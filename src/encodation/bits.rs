/// Bit writer, the first bit written becomes the most significant bit of
/// the first byte.
#[derive(Debug, Default)]
pub(crate) struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    pub(crate) fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            len: 0,
        }
    }

    /// Number of bits written so far.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Append the `count` lowest bits of `value`, most significant first.
    pub(crate) fn push(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32);
        for i in (0..count).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Fill with zero bits up to the next byte boundary.
    pub(crate) fn align_to_byte(&mut self) {
        // the partial byte is already zero padded in `bytes`
        self.len = self.bytes.len() * 8;
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[test]
fn push_msb_first() {
    let mut bits = Bits::default();
    bits.push(0b0100, 4);
    bits.push(0x0b, 8);
    assert_eq!(bits.len(), 12);
    bits.align_to_byte();
    assert_eq!(bits.len(), 16);
    assert_eq!(bits.into_bytes(), vec![0x40, 0xb0]);
}

#[test]
fn push_wide_values() {
    let mut bits = Bits::default();
    bits.push(0xABCD, 16);
    bits.push(1, 1);
    assert_eq!(bits.len(), 17);
    assert_eq!(bits.into_bytes(), vec![0xAB, 0xCD, 0x80]);
}

#[test]
fn align_is_noop_on_boundary() {
    let mut bits = Bits::default();
    bits.push(0xFF, 8);
    bits.align_to_byte();
    assert_eq!(bits.len(), 8);
    assert_eq!(bits.into_bytes(), vec![0xFF]);
}
