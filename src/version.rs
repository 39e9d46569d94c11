use core::cmp::Ordering;

#[cfg(test)]
use enum_iterator::Sequence;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Number of bits of the mode indicator in front of the data.
pub(crate) const MODE_BITS: usize = 4;

/// Bits of the terminator which must fit behind the data.
pub(crate) const TERMINATOR_BITS: usize = 4;

pub(crate) struct BlockSetup {
    /// Number of interleaved error correction blocks
    pub(crate) num_ecc_blocks: usize,
    /// Number of error correction codewords per block
    pub(crate) num_ecc_per_block: usize,
}

impl BlockSetup {
    pub(crate) fn num_error_codes(&self) -> usize {
        self.num_ecc_blocks * self.num_ecc_per_block
    }
}

/// The symbol versions supported by the encoder.
///
/// A version of a QR code determines its size, [V1](Version::V1) is 21
/// modules (the tiny black squares) wide, and every further version adds
/// four modules. All versions use the error correction level L.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum Version {
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    V10,
}

#[rustfmt::skip]
const VERSIONS: &[Version] = &[
    Version::V1, Version::V2, Version::V3, Version::V4, Version::V5,
    Version::V6, Version::V7, Version::V8, Version::V9, Version::V10,
];

impl Version {
    /// Iterate over all supported versions, smallest first.
    pub fn all() -> impl Iterator<Item = Version> {
        VERSIONS.iter().cloned()
    }

    /// The smallest version which can hold a payload of `len` bytes.
    pub fn smallest_for(len: usize) -> Option<Version> {
        Self::all().find(|v| v.fits(len))
    }

    /// The largest supported version.
    pub fn max() -> Version {
        Version::V10
    }

    /// Version number as used in the standard, 1 for [V1](Version::V1).
    pub fn number(&self) -> usize {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
            Self::V6 => 6,
            Self::V7 => 7,
            Self::V8 => 8,
            Self::V9 => 9,
            Self::V10 => 10,
        }
    }

    /// Number of modules the symbol is tall and wide, without quiet zone.
    pub fn width(&self) -> usize {
        self.number() * 4 + 17
    }

    pub(crate) fn num_data_codewords(&self) -> usize {
        match self {
            Self::V1 => 19,
            Self::V2 => 34,
            Self::V3 => 55,
            Self::V4 => 80,
            Self::V5 => 108,
            Self::V6 => 136,
            Self::V7 => 156,
            Self::V8 => 194,
            Self::V9 => 232,
            Self::V10 => 274,
        }
    }

    pub(crate) fn block_setup(&self) -> BlockSetup {
        let (num_ecc_blocks, num_ecc_per_block) = match self {
            Self::V1 => (1, 7),
            Self::V2 => (1, 10),
            Self::V3 => (1, 15),
            Self::V4 => (1, 20),
            Self::V5 => (1, 26),
            Self::V6 => (2, 18),
            Self::V7 => (2, 20),
            Self::V8 => (2, 24),
            Self::V9 => (2, 30),
            Self::V10 => (4, 18),
        };
        BlockSetup {
            num_ecc_blocks,
            num_ecc_per_block,
        }
    }

    /// Row and column coordinates of the alignment pattern centers.
    ///
    /// The patterns are placed at every combination of these coordinates,
    /// except where they would overlap a finder pattern.
    pub(crate) fn alignment_positions(&self) -> &'static [usize] {
        match self {
            Self::V1 => &[],
            Self::V2 => &[6, 18],
            Self::V3 => &[6, 22],
            Self::V4 => &[6, 26],
            Self::V5 => &[6, 30],
            Self::V6 => &[6, 34],
            Self::V7 => &[6, 22, 38],
            Self::V8 => &[6, 24, 42],
            Self::V9 => &[6, 26, 46],
            Self::V10 => &[6, 28, 50],
        }
    }

    /// Width of the character count field for byte mode.
    pub(crate) fn char_count_bits(&self) -> usize {
        if self.number() <= 9 {
            8
        } else {
            16
        }
    }

    /// Number of bits needed to encode `len` bytes, terminator not included.
    pub(crate) fn required_bits(&self, len: usize) -> usize {
        MODE_BITS + self.char_count_bits() + 8 * len
    }

    fn fits(&self, len: usize) -> bool {
        self.required_bits(len) + TERMINATOR_BITS <= self.num_data_codewords() * 8
    }

    /// Maximum number of payload bytes this version can hold.
    pub fn capacity(&self) -> usize {
        let bits = self.num_data_codewords() * 8 - MODE_BITS - self.char_count_bits();
        (bits - TERMINATOR_BITS) / 8
    }

    /// The 18 bit version information, only present for version 7 and up.
    ///
    /// The six bit version number is followed by twelve bits of a BCH(18, 6)
    /// code.
    pub(crate) fn version_info(&self) -> Option<u32> {
        let v = self.number() as u32;
        if v < 7 {
            return None;
        }
        Some(bch_code(v, 6, VERSION_GENERATOR))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number().cmp(&other.number())
    }
}

/// Generator polynomial of the BCH code protecting the version information.
const VERSION_GENERATOR: u32 = 0x1F25;

/// Generator polynomial of the BCH code protecting the format information.
pub(crate) const FORMAT_GENERATOR: u32 = 0x537;

/// Append the remainder of `data * x^k` modulo `generator` to `data`.
///
/// `bits` is the length of `data`, `k` the degree of `generator`.
pub(crate) const fn bch_code(data: u32, bits: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    let mut rem = data << degree;
    let mut i = bits;
    while i > 0 {
        i -= 1;
        if rem & (1 << (i + degree)) != 0 {
            rem ^= generator << i;
        }
    }
    (data << degree) | rem
}

#[test]
fn test_version_order() {
    let mut all: Vec<Version> = enum_iterator::all::<Version>().collect();
    all.sort_unstable();
    assert_eq!(&all, VERSIONS);
    let listed: Vec<Version> = Version::all().collect();
    assert_eq!(&listed, VERSIONS);
}

#[test]
fn test_widths() {
    assert_eq!(Version::V1.width(), 21);
    assert_eq!(Version::V7.width(), 45);
    assert_eq!(Version::V10.width(), 57);
}

#[test]
fn test_capacities() {
    // byte mode capacities for error correction level L from ISO/IEC 18004
    let capacities: Vec<usize> = Version::all().map(|v| v.capacity()).collect();
    assert_eq!(
        capacities,
        vec![17, 32, 53, 78, 106, 134, 154, 192, 230, 271]
    );
}

#[test]
fn test_smallest_for() {
    assert_eq!(Version::smallest_for(0), Some(Version::V1));
    for v in enum_iterator::all::<Version>() {
        let cap = v.capacity();
        assert_eq!(Version::smallest_for(cap), Some(v));
        assert_ne!(Version::smallest_for(cap + 1), Some(v));
    }
    assert_eq!(Version::smallest_for(18), Some(Version::V2));
    assert_eq!(Version::smallest_for(231), Some(Version::V10));
    assert_eq!(Version::smallest_for(272), None);
}

#[test]
fn test_codeword_counts() {
    // total codewords per version, including all error correction
    let total: Vec<usize> = Version::all()
        .map(|v| v.num_data_codewords() + v.block_setup().num_error_codes())
        .collect();
    assert_eq!(total, vec![26, 44, 70, 100, 134, 172, 196, 242, 292, 346]);
}

#[test]
fn test_version_info() {
    assert_eq!(Version::V6.version_info(), None);
    assert_eq!(Version::V7.version_info(), Some(0x07C94));
    assert_eq!(Version::V8.version_info(), Some(0x085BC));
    assert_eq!(Version::V9.version_info(), Some(0x09A99));
    assert_eq!(Version::V10.version_info(), Some(0x0A4D3));
}

#[test]
fn test_alignment_positions_in_bounds() {
    for v in enum_iterator::all::<Version>() {
        for &p in v.alignment_positions() {
            assert!(p + 2 < v.width(), "{:?}", v);
        }
        if let Some(&last) = v.alignment_positions().last() {
            assert_eq!(last, v.width() - 7);
        }
    }
}
