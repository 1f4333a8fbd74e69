use log::debug;

use super::matrix::Matrix;
use crate::common::bitstream::BitStream;
use crate::common::codec::Mode;
use crate::common::iter::ZigZagIter;
use crate::common::mask::{self, MaskPattern};
use crate::common::metadata::{
    format_info, ECLevel, Version, FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN,
};

// QR code
//------------------------------------------------------------------------------

/// A fully encoded symbol: the module matrix plus the choices made while
/// building it.
#[derive(Debug, Clone)]
pub struct QRCode {
    matrix: Matrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    mode: Mode,
    encoded_bit_len: usize,
}

impl QRCode {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mode: Mode,
        encoded_bit_len: usize,
    ) -> Self {
        Self {
            matrix: Matrix::new(version.width()),
            version,
            ec_level,
            mask: MaskPattern::new(0),
            mode,
            encoded_bit_len,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Masking pattern applied to the symbol.
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Mode the data was encoded in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Length of the segment in bits, before padding and error correction.
    pub fn encoded_bit_len(&self) -> usize {
        self.encoded_bit_len
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.matrix.size()
    }

    /// `true` is a dark module.
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.matrix.get(r, c)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

// Function pattern placement
//------------------------------------------------------------------------------

impl QRCode {
    /// Stamps every function pattern and reserves the format area. Must run
    /// before the payload is placed.
    pub(crate) fn draw_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_patterns();
        self.draw_alignment_patterns();
        self.draw_version_info();
        self.reserve_format_area();
        debug!("Drew function patterns for version {}", *self.version);
    }

    fn draw_finder_patterns(&mut self) {
        let offset = self.matrix.size() as i32 - 7;
        self.draw_finder_pattern(0, 0);
        self.draw_finder_pattern(0, offset);
        self.draw_finder_pattern(offset, 0);
    }

    // 7x7 ring-in-ring plus the light separator band, clipped at the edges.
    fn draw_finder_pattern(&mut self, top: i32, left: i32) {
        let size = self.matrix.size() as i32;
        for dr in -1..=7 {
            for dc in -1..=7 {
                let (r, c) = (top + dr, left + dc);
                if r < 0 || c < 0 || r >= size || c >= size {
                    continue;
                }
                let d = (dr - 3).abs().max((dc - 3).abs());
                self.matrix.set(r as usize, c as usize, d <= 1 || d == 3, true);
            }
        }
    }

    fn draw_timing_patterns(&mut self) {
        let size = self.matrix.size();
        for i in 8..=size - 9 {
            let dark = i & 1 == 0;
            self.matrix.set(6, i, dark, true);
            self.matrix.set(i, 6, dark, true);
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let centers = self.version.alignment_pattern();
        let Some(&last) = centers.last() else {
            return;
        };
        for &r in centers {
            for &c in centers {
                // The three finder corners stay clear.
                if (r == 6 && c == 6) || (r == 6 && c == last) || (r == last && c == 6) {
                    continue;
                }
                for dr in -2..=2i32 {
                    for dc in -2..=2i32 {
                        let d = dr.abs().max(dc.abs());
                        let (ar, ac) = ((r as i32 + dr) as usize, (c as i32 + dc) as usize);
                        self.matrix.set(ar, ac, d != 1, true);
                    }
                }
            }
        }
    }

    // Two mirrored 6x3 blocks beside the top-right and bottom-left finders,
    // LSB first.
    fn draw_version_info(&mut self) {
        if *self.version < 7 {
            return;
        }
        let info = self.version.info();
        let size = self.matrix.size();
        for i in 0..VERSION_INFO_BIT_LEN {
            let dark = (info >> i) & 1 == 1;
            let (r, c) = (i / 3, size - 11 + i % 3);
            self.matrix.set(r, c, dark, true);
            self.matrix.set(c, r, dark, true);
        }
    }

    fn reserve_format_area(&mut self) {
        let size = self.matrix.size();
        for i in 0..FORMAT_INFO_BIT_LEN {
            for (r, c) in format_info_coords(size, i) {
                self.matrix.mark_reserved(r, c, true);
            }
        }
        // Dark module, fixed for every symbol.
        self.matrix.set(size - 8, 8, true, true);
    }

    /// Writes both format info copies. Runs last, once the mask is known.
    pub(crate) fn draw_format_info(&mut self, pattern: MaskPattern) {
        let info = format_info(self.ec_level, pattern);
        let size = self.matrix.size();
        for i in 0..FORMAT_INFO_BIT_LEN {
            let dark = (info >> i) & 1 == 1;
            for (r, c) in format_info_coords(size, i) {
                self.matrix.mark_reserved(r, c, false);
                self.matrix.set(r, c, dark, true);
            }
        }
        self.mask = pattern;
    }
}

/// Module coordinates of format bit `i` in both copies: the L around the
/// top-left finder and the split strip under the other two.
fn format_info_coords(size: usize, i: usize) -> [(usize, usize); 2] {
    let top_left = match i {
        0..=5 => (i, 8),
        6 | 7 => (i + 1, 8),
        // (8, 6) belongs to the timing column and is skipped over.
        8 => (8, 7),
        _ => (8, 14 - i),
    };
    let split = match i {
        0..=7 => (8, size - 1 - i),
        _ => (size - 15 + i, 8),
    };
    [top_left, split]
}

// Payload placement and masking
//------------------------------------------------------------------------------

impl QRCode {
    /// Fills the encoding region with the interleaved payload bits, walking
    /// the zig-zag order and skipping reserved modules.
    pub(crate) fn place_payload(&mut self, payload: &BitStream) {
        let mut bits = payload.into_iter();
        for (r, c) in ZigZagIter::new(self.matrix.size()) {
            if self.matrix.is_reserved(r, c) {
                continue;
            }
            let dark = bits.next().unwrap_or(false);
            self.matrix.set(r, c, dark, false);
        }
        debug_assert!(bits.next().is_none(), "Payload overflows the encoding region");
    }

    pub(crate) fn apply_mask(&mut self, pattern: MaskPattern) {
        mask::apply_mask(&mut self.matrix, pattern);
    }

    pub(crate) fn apply_best_mask(&mut self) -> MaskPattern {
        let pattern = mask::find_best_mask(&mut self.matrix);
        mask::apply_mask(&mut self.matrix, pattern);
        pattern
    }
}

// Rendering
//------------------------------------------------------------------------------

impl QRCode {
    /// Compact one-char-per-module view for tests and debugging.
    pub fn to_debug_str(&self) -> String {
        let size = self.matrix.size();
        let mut res = String::with_capacity(size * (size + 1));
        for row in self.matrix.rows() {
            res.push('\n');
            for &module in row {
                res.push(if module { '#' } else { '-' });
            }
        }
        res
    }

    /// Text-art render, two characters per module, with the standard 4-module
    /// quiet zone.
    pub fn to_str(&self) -> String {
        const QUIET_ZONE: usize = 4;

        let size = self.matrix.size();
        let span = size + 2 * QUIET_ZONE;
        let mut res = String::with_capacity(span * (span * 2 + 1));
        let blank = "  ".repeat(span);
        for _ in 0..QUIET_ZONE {
            res.push_str(&blank);
            res.push('\n');
        }
        for row in self.matrix.rows() {
            res.push_str(&"  ".repeat(QUIET_ZONE));
            for &module in row {
                res.push_str(if module { "\u{2588}\u{2588}" } else { "  " });
            }
            res.push_str(&"  ".repeat(QUIET_ZONE));
            res.push('\n');
        }
        for _ in 0..QUIET_ZONE {
            res.push_str(&blank);
            res.push('\n');
        }
        res
    }
}
