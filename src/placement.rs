//! Arrangement of bits in a QR code symbol.
//!
//! The module contains the struct [MatrixMap] which holds the modules of a
//! symbol while it is built. It draws the function patterns (finders,
//! timing, alignment, ...), remembers which modules belong to them, and
//! can be used to iterate over the free module positions in codeword order.
//! This is used to write the encoded data into the symbol.
//!
//! An abstract bitmap struct [Bitmap] is the final output of encoding. It
//! also contains helpers for rendering.
use flagset::FlagSet;

use crate::version::Version;

mod function;
mod zigzag;

pub use function::Function;
use zigzag::ZigZag;

/// Width of the quiet zone around a symbol in modules.
pub const QUIET_ZONE: usize = 4;

/// Format information for error correction level L and mask pattern 0,
/// already masked with `0x5412`.
pub const FORMAT_INFO: u16 = 0b111011111000100;

/// Trait for a visitor to the symbol's bits.
///
/// A bit is called "module" in ISO/IEC 18004. Each codeword consists
/// of eight bits (modules).
///
/// During traversal the visitor is called with the codewords' bits in
/// placement order, the first entry is the most significant bit. It can
/// either read or write them.
pub trait Visitor<B: Bit> {
    /// Visit the next codewords' bits.
    fn visit(&mut self, codeword_index: usize, bits: &mut [B; 8]);
}

/// Abstract "bit" type used in [MatrixMap].
pub trait Bit: Clone + PartialEq + core::fmt::Debug {
    const LOW: Self;
    const HIGH: Self;

    /// The bit with the other value, used for masking.
    fn inverted(&self) -> Self {
        if *self == Self::HIGH {
            Self::LOW
        } else {
            Self::HIGH
        }
    }
}

/// Representation of the modules of a QR code symbol under construction.
///
/// Next to the module values it keeps a second grid recording for every
/// module which function patterns cover it. Modules of function patterns
/// are called reserved, data is never placed there and the mask does not
/// apply to them.
pub struct MatrixMap<B: Bit> {
    entries: Vec<B>,
    functions: Vec<FlagSet<Function>>,
    width: usize,
}

impl<B: Bit> MatrixMap<B> {
    /// Create a new matrix for the given version with all function
    /// patterns drawn and the format information areas reserved.
    pub fn new(version: Version) -> Self {
        let width = version.width();
        let mut map = Self {
            entries: vec![B::LOW; width * width],
            functions: vec![FlagSet::default(); width * width],
            width,
        };
        map.draw_finders();
        map.draw_alignments(version.alignment_positions());
        map.draw_timing();
        map.draw_dark_module();
        map.reserve_format_info();
        if let Some(info) = version.version_info() {
            map.draw_version_info(info);
        }
        map
    }

    /// Number of modules the symbol is wide (and tall).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Check if the module in row `i` and column `j` belongs to a function
    /// pattern.
    pub fn is_reserved(&self, i: usize, j: usize) -> bool {
        !self.functions[i * self.width + j].is_empty()
    }

    /// The function patterns covering the module in row `i` and column `j`.
    pub fn functions_at(&self, i: usize, j: usize) -> FlagSet<Function> {
        self.functions[i * self.width + j]
    }

    /// Traverse the free modules in codeword order and call the visitor.
    ///
    /// The modules are visited in the zig-zag order of the standard, see
    /// [ZigZag]. Every eight free modules make up one codeword. Free modules
    /// left over at the end (the remainder bits) are not visited and stay
    /// [LOW](Bit::LOW).
    pub fn traverse<V: Visitor<B>>(&mut self, visitor: &mut V) {
        let mut codeword_idx = 0;
        let mut indices = arrayvec::ArrayVec::<usize, 8>::new();
        for (i, j) in ZigZag::new(self.width) {
            if self.is_reserved(i, j) {
                continue;
            }
            indices.push(i * self.width + j);
            if let Ok(full) = <[usize; 8]>::try_from(indices.as_slice()) {
                let mut bits = full.map(|idx| self.entries[idx].clone());
                visitor.visit(codeword_idx, &mut bits);
                for (idx, bit) in full.into_iter().zip(bits) {
                    self.entries[idx] = bit;
                }
                codeword_idx += 1;
                indices.clear();
            }
        }
    }

    /// Apply the mask pattern 0 to all modules which are not reserved.
    ///
    /// The pattern inverts the modules with `(i + j) % 2 == 0`, a
    /// checkerboard.
    pub fn apply_mask(&mut self) {
        for i in 0..self.width {
            for j in 0..self.width {
                let idx = i * self.width + j;
                if self.functions[idx].is_empty() && (i + j) % 2 == 0 {
                    self.entries[idx] = self.entries[idx].inverted();
                }
            }
        }
    }

    /// Get the content of the matrix as a bitmap.
    pub fn bitmap(&self) -> Bitmap<B> {
        Bitmap {
            width: self.width,
            bits: self.entries.clone(),
        }
    }

    // Set a module of a function pattern, positions outside are ignored.
    fn set_function(&mut self, i: isize, j: isize, dark: bool, kind: Function) {
        let w = self.width as isize;
        if i < 0 || j < 0 || i >= w || j >= w {
            return;
        }
        let idx = i as usize * self.width + j as usize;
        self.entries[idx] = if dark { B::HIGH } else { B::LOW };
        self.functions[idx] |= kind;
    }
}

/// An abstract bitmap.
///
/// Contains helpers for rendering the content. For rendering targets which
/// use something similar to pixels try [pixels()](Self::pixels).
pub struct Bitmap<M> {
    width: usize,
    bits: Vec<M>,
}

impl Bit for bool {
    const LOW: bool = false;
    const HIGH: bool = true;
}

impl<B: Bit> Bitmap<B> {
    /// Return the width of the bitmap (no quiet zone included).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the height of the bitmap (no quiet zone included).
    pub fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Get the module at column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&B> {
        if x >= self.width {
            return None;
        }
        self.bits.get(y * self.width + x)
    }

    /// Compute a unicode representation ("ASCII art").
    ///
    /// This is intended as a demo functionality. It might look weird
    /// if the line height is wrong or if you are not using a monospaced font.
    /// The output is inverted: dark modules are blank, light modules are
    /// drawn with the text color.
    pub fn unicode(&self) -> String {
        const BORDER: usize = QUIET_ZONE;
        const INVERT: bool = true;
        const CHAR: [char; 4] = [' ', '▄', '▀', '█'];
        let height = self.height();
        let get = |i: usize, j: usize| -> usize {
            let res =
                if i < BORDER || i >= BORDER + height || j < BORDER || j >= BORDER + self.width {
                    B::LOW
                } else {
                    self.bits[(i - BORDER) * self.width + (j - BORDER)].clone()
                };
            usize::from(res == B::HIGH)
        };
        let mut out =
            String::with_capacity((height + 2 * BORDER) * (self.width + 1 + 2 * BORDER) * 3 / 2);
        for i in (0..height + 2 * BORDER).step_by(2) {
            for j in 0..(self.width + 2 * BORDER) {
                let idx = (get(i, j) << 1) | get(i + 1, j);
                out.push(CHAR[if INVERT { (!idx) & 0b11 } else { idx }]);
            }
            out.push('\n');
        }
        out
    }

    /// Get an iterator over the dark modules' coordinates `(x, y)`.
    ///
    /// Depending on your target, such a module may be rendered using
    /// multiple image pixels, or whatever you use to visualize the symbol.
    ///
    /// The coordinate system is centered in the top left corner starting
    /// in `(0, 0)` with a horizontal x-axis and vertical y-axis.
    /// The modules are returned in order, incrementing x before y.
    ///
    /// A quiet zone is not included in the coordinates but one must
    /// be added when rendering: The free space around the symbol has to be
    /// [QUIET_ZONE] modules wide and should have the background's color.
    ///
    /// # Example
    ///
    /// ```rust
    /// let code = crypax_qr::QrCode::encode(b"Foo").unwrap();
    /// for (x, y) in code.bitmap().pixels() {
    ///     // place square at (x, y) to render this QR code
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width();
        self.bits
            .iter()
            .enumerate()
            .filter(|(_i, b)| **b == B::HIGH)
            .map(move |(i, _b)| (i % w, i / w))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Bit, MatrixMap, Visitor};
    use crate::version::Version;

    impl Bit for (u16, u8) {
        const LOW: Self = (0, 0);
        const HIGH: Self = (0, 1);
    }

    struct LogVisitor;

    impl Visitor<(u16, u8)> for LogVisitor {
        fn visit(&mut self, cw: usize, bits: &mut [(u16, u8); 8]) {
            for (i, bit) in bits.iter_mut().enumerate() {
                *bit = ((cw + 1) as u16, (i + 1) as u8);
            }
        }
    }

    pub(super) fn log(v: Version) -> MatrixMap<(u16, u8)> {
        let mut m = MatrixMap::<(u16, u8)>::new(v);
        m.traverse(&mut LogVisitor);
        m
    }

    #[test]
    fn test_first_codewords_v1() {
        let m = log(Version::V1);
        let at = |i: usize, j: usize| m.entries[i * 21 + j];
        // upward in the two rightmost columns, right before left
        assert_eq!(at(20, 20), (1, 1));
        assert_eq!(at(20, 19), (1, 2));
        assert_eq!(at(19, 20), (1, 3));
        assert_eq!(at(17, 19), (1, 8));
        assert_eq!(at(16, 20), (2, 1));
        // above the bottom right corner begins the format information
        assert_eq!(at(9, 19), (3, 8));
        assert!(m.is_reserved(8, 20));
        // the next column pair goes downward
        assert_eq!(at(9, 18), (4, 1));
        assert_eq!(at(9, 17), (4, 2));
        assert_eq!(at(10, 18), (4, 3));
    }

    #[test]
    fn test_skips_vertical_timing() {
        let m = log(Version::V1);
        let at = |i: usize, j: usize| m.entries[i * 21 + j];
        // the column pair left of the timing pattern is 5 and 4
        assert!(m.is_reserved(9, 6));
        assert_ne!(at(9, 5).0, 0);
        assert_ne!(at(9, 4).0, 0);
        // last codeword ends in the bottom left data area
        assert_eq!(at(12, 0), (26, 8));
    }

    #[test]
    fn test_codewords_and_remainder_bits() {
        let remainder = [0, 7, 7, 7, 7, 7, 0, 0, 0, 0];
        for (v, rem) in Version::all().zip(remainder) {
            let m = log(v);
            let last = m.entries.iter().map(|e| e.0).max().unwrap() as usize;
            let codewords = v.num_data_codewords() + v.block_setup().num_error_codes();
            assert_eq!(last, codewords, "{:?}", v);

            let free = (0..m.width * m.width)
                .filter(|idx| m.functions[*idx].is_empty())
                .count();
            assert_eq!(free, codewords * 8 + rem, "{:?}", v);
            let unvisited = (0..m.width * m.width)
                .filter(|idx| m.functions[*idx].is_empty() && m.entries[*idx].0 == 0)
                .count();
            assert_eq!(unvisited, rem, "{:?}", v);
        }
    }

    #[test]
    fn test_bit_inverted() {
        assert_eq!(true.inverted(), false);
        assert_eq!(false.inverted(), true);
        assert_eq!((0u16, 0u8).inverted(), (0, 1));
        assert_eq!((3u16, 5u8).inverted(), (0, 1));
    }

    #[test]
    fn test_mask_spares_function_patterns() {
        let mut m = MatrixMap::<bool>::new(Version::V7);
        let before = m.entries.clone();
        m.apply_mask();
        for i in 0..m.width {
            for j in 0..m.width {
                let idx = i * m.width + j;
                if m.is_reserved(i, j) {
                    assert_eq!(m.entries[idx], before[idx]);
                } else {
                    assert_eq!(m.entries[idx], (i + j) % 2 == 0);
                }
            }
        }
    }
}
