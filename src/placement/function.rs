//! Function patterns of a QR code symbol.
//!
//! These are the modules which do not carry data: the three finder patterns
//! with their separators, the timing patterns, the alignment patterns, the
//! dark module, and the areas holding format and version information.
use flagset::flags;

use super::{Bit, MatrixMap};

flags! {
    /// Kinds of function patterns.
    ///
    /// A module can be covered by more than one pattern, alignment
    /// patterns of version 7 and up cross the timing patterns.
    pub enum Function: u8 {
        Finder      = 0b0000001,
        Separator   = 0b0000010,
        Timing      = 0b0000100,
        Alignment   = 0b0001000,
        DarkModule  = 0b0010000,
        Format      = 0b0100000,
        VersionInfo = 0b1000000,
    }
}

/// Row and column of the timing patterns.
pub(super) const TIMING: usize = 6;

/// Positions `(i, j)` of the format information bits, bit 0 first.
///
/// The first copy surrounds the top left finder pattern, the second copy is
/// split between the top right and the bottom left finder pattern.
fn format_positions(width: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (bit, (pos1, pos2)) in first.iter_mut().zip(second.iter_mut()).enumerate() {
        *pos1 = match bit {
            0..=5 => (bit, 8),
            6 => (7, 8),
            7 => (8, 8),
            8 => (8, 7),
            _ => (8, 14 - bit),
        };
        *pos2 = match bit {
            0..=7 => (8, width - 1 - bit),
            _ => (width - 15 + bit, 8),
        };
    }
    [first, second]
}

impl<B: Bit> MatrixMap<B> {
    /// Draw the finder patterns in three corners together with their
    /// separators.
    pub(super) fn draw_finders(&mut self) {
        let far = (self.width - 7) as isize;
        for (top, left) in [(0, 0), (0, far), (far, 0)] {
            for di in -1..=7 {
                for dj in -1..=7 {
                    let (i, j) = (top + di, left + dj);
                    if di == -1 || di == 7 || dj == -1 || dj == 7 {
                        self.set_function(i, j, false, Function::Separator);
                        continue;
                    }
                    let ring = di == 0 || di == 6 || dj == 0 || dj == 6;
                    let center = (2..=4).contains(&di) && (2..=4).contains(&dj);
                    self.set_function(i, j, ring || center, Function::Finder);
                }
            }
        }
    }

    /// Draw the alignment patterns centered at all combinations of
    /// `positions`, except those overlapping the finder patterns.
    ///
    /// Must be called after [draw_finders](Self::draw_finders).
    pub(super) fn draw_alignments(&mut self, positions: &[usize]) {
        for &ci in positions {
            for &cj in positions {
                if self.is_reserved(ci, cj) {
                    continue;
                }
                for di in -2isize..=2 {
                    for dj in -2isize..=2 {
                        let dark = di.abs() == 2 || dj.abs() == 2 || (di == 0 && dj == 0);
                        let (i, j) = (ci as isize + di, cj as isize + dj);
                        self.set_function(i, j, dark, Function::Alignment);
                    }
                }
            }
        }
    }

    /// Draw the timing patterns on row and column 6, starting with a dark
    /// module next to the finder separators.
    pub(super) fn draw_timing(&mut self) {
        let t = TIMING as isize;
        for k in 8..(self.width - 8) {
            let dark = k % 2 == 0;
            self.set_function(t, k as isize, dark, Function::Timing);
            self.set_function(k as isize, t, dark, Function::Timing);
        }
    }

    /// The single dark module above the bottom left finder pattern.
    pub(super) fn draw_dark_module(&mut self) {
        let i = (self.width - 8) as isize;
        self.set_function(i, 8, true, Function::DarkModule);
    }

    /// Reserve both copies of the format information before data placement.
    pub(super) fn reserve_format_info(&mut self) {
        for copy in format_positions(self.width) {
            for (i, j) in copy {
                self.set_function(i as isize, j as isize, false, Function::Format);
            }
        }
    }

    /// Draw the 18 bit version information next to the top right and the
    /// bottom left finder pattern.
    ///
    /// Bit `k` goes to row `k / 3` and column `width - 11 + k % 3` of the
    /// top right block, the bottom left block is transposed.
    pub(super) fn draw_version_info(&mut self, info: u32) {
        let base = (self.width - 11) as isize;
        for k in 0..18 {
            let dark = (info >> k) & 1 == 1;
            let a = base + (k % 3) as isize;
            let b = (k / 3) as isize;
            self.set_function(b, a, dark, Function::VersionInfo);
            self.set_function(a, b, dark, Function::VersionInfo);
        }
    }

    /// Write the format information into its reserved areas.
    ///
    /// This has to happen after masking, the format information is never
    /// masked.
    pub fn draw_format_info(&mut self, info: u16) {
        for copy in format_positions(self.width) {
            for (bit, (i, j)) in copy.into_iter().enumerate() {
                let dark = (info >> bit) & 1 == 1;
                self.set_function(i as isize, j as isize, dark, Function::Format);
            }
        }
    }
}
