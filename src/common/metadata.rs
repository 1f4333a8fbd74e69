use std::ops::Deref;

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Version
//------------------------------------------------------------------------------

/// QR symbol version, 1 through 40. Determines the module count per side
/// (`4 * v + 17`) and, together with the error correction level, every
/// capacity figure of the symbol.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(pub(crate) u8);

impl Version {
    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    /// Modules per side.
    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Data plus error correction codewords held by the symbol.
    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.index()]
    }

    /// Error correction codewords computed per block.
    pub fn ecc_per_block(self, ec_level: ECLevel) -> usize {
        ECC_PER_BLOCK[self.index()][ec_level as usize]
    }

    /// Block structure as `(g1_size, g1_count, g2_size, g2_count)`: the first
    /// group holds `g1_count` blocks of `g1_size` data codewords, the second
    /// `g2_count` blocks of `g1_size + 1` codewords (`g2_size` is 0 when the
    /// second group is empty).
    pub fn data_codewords_per_block(self, ec_level: ECLevel) -> (usize, usize, usize, usize) {
        DATA_CODEWORDS_PER_BLOCK[self.index()][ec_level as usize]
    }

    pub fn total_data_codewords(self, ec_level: ECLevel) -> usize {
        let (size1, count1, size2, count2) = self.data_codewords_per_block(ec_level);
        size1 * count1 + size2 * count2
    }

    /// Required bit stream length before error correction.
    pub fn data_bit_capacity(self, ec_level: ECLevel) -> usize {
        self.total_data_codewords(ec_level) << 3
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    /// Width of the character count indicator for a mode.
    pub fn char_count_bits(self, mode: Mode) -> usize {
        let bucket = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][bucket],
            Mode::Alphanumeric => [9, 11, 13][bucket],
            Mode::Byte => [8, 16, 16][bucket],
        }
    }

    /// Alignment pattern center coordinates, row and column alike. Empty for
    /// version 1.
    pub fn alignment_pattern(self) -> &'static [usize] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// 18-bit version information field, Golay-protected. Defined for
    /// versions 7 and up only.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined for version 7 and up");
        VERSION_INFOS[self.0 as usize - 7]
    }

    /// Zero bits appended after the interleaved codewords to fill the
    /// encoding region exactly.
    pub fn remainder_bits(self) -> usize {
        match self.0 {
            2..=6 => 7,
            14..=20 | 28..=34 => 3,
            21..=27 => 4,
            _ => 0,
        }
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Two-bit field value used in the format information.
    pub(crate) const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Format info
//------------------------------------------------------------------------------

/// 15-bit BCH-protected format information for an error correction level and
/// masking pattern pair.
pub(crate) fn format_info(ec_level: ECLevel, pattern: MaskPattern) -> u32 {
    let format_data = (ec_level.format_bits() << 3) | *pattern as u32;
    FORMAT_INFOS[format_data as usize]
}

pub(crate) const FORMAT_INFO_BIT_LEN: usize = 15;

pub(crate) const VERSION_INFO_BIT_LEN: usize = 18;

// Capacity tables
//------------------------------------------------------------------------------

static TOTAL_CODEWORDS: [usize; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761, 2876,
    3034, 3196, 3362, 3532, 3706,
];

// Indexed by version - 1, then by ECLevel (L, M, Q, H).
static ECC_PER_BLOCK: [[usize; 4]; 40] = [
    [7, 10, 13, 17],
    [10, 16, 22, 28],
    [15, 26, 18, 22],
    [20, 18, 26, 16],
    [26, 24, 18, 22],
    [18, 16, 24, 28],
    [20, 18, 18, 26],
    [24, 22, 22, 26],
    [30, 22, 20, 24],
    [18, 26, 24, 28],
    [20, 30, 28, 24],
    [24, 22, 26, 28],
    [26, 22, 24, 22],
    [30, 24, 20, 24],
    [22, 24, 30, 24],
    [24, 28, 24, 30],
    [28, 28, 28, 28],
    [30, 26, 28, 28],
    [28, 26, 26, 26],
    [28, 26, 30, 28],
    [28, 26, 28, 30],
    [28, 28, 30, 24],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [26, 28, 30, 30],
    [28, 28, 28, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
    [30, 28, 30, 30],
];

// Indexed by version - 1, then by ECLevel; entries are
// (g1_size, g1_count, g2_size, g2_count) in data codewords.
static DATA_CODEWORDS_PER_BLOCK: [[(usize, usize, usize, usize); 4]; 40] = [
    [(19, 1, 0, 0), (16, 1, 0, 0), (13, 1, 0, 0), (9, 1, 0, 0)],
    [(34, 1, 0, 0), (28, 1, 0, 0), (22, 1, 0, 0), (16, 1, 0, 0)],
    [(55, 1, 0, 0), (44, 1, 0, 0), (17, 2, 0, 0), (13, 2, 0, 0)],
    [(80, 1, 0, 0), (32, 2, 0, 0), (24, 2, 0, 0), (9, 4, 0, 0)],
    [(108, 1, 0, 0), (43, 2, 0, 0), (15, 2, 16, 2), (11, 2, 12, 2)],
    [(68, 2, 0, 0), (27, 4, 0, 0), (19, 4, 0, 0), (15, 4, 0, 0)],
    [(78, 2, 0, 0), (31, 4, 0, 0), (14, 2, 15, 4), (13, 4, 14, 1)],
    [(97, 2, 0, 0), (38, 2, 39, 2), (18, 4, 19, 2), (14, 4, 15, 2)],
    [(116, 2, 0, 0), (36, 3, 37, 2), (16, 4, 17, 4), (12, 4, 13, 4)],
    [(68, 2, 69, 2), (43, 4, 44, 1), (19, 6, 20, 2), (15, 6, 16, 2)],
    [(81, 4, 0, 0), (50, 1, 51, 4), (22, 4, 23, 4), (12, 3, 13, 8)],
    [(92, 2, 93, 2), (36, 6, 37, 2), (20, 4, 21, 6), (14, 7, 15, 4)],
    [(107, 4, 0, 0), (37, 8, 38, 1), (20, 8, 21, 4), (11, 12, 12, 4)],
    [(115, 3, 116, 1), (40, 4, 41, 5), (16, 11, 17, 5), (12, 11, 13, 5)],
    [(87, 5, 88, 1), (41, 5, 42, 5), (24, 5, 25, 7), (12, 11, 13, 7)],
    [(98, 5, 99, 1), (45, 7, 46, 3), (19, 15, 20, 2), (15, 3, 16, 13)],
    [(107, 1, 108, 5), (46, 10, 47, 1), (22, 1, 23, 15), (14, 2, 15, 17)],
    [(120, 5, 121, 1), (43, 9, 44, 4), (22, 17, 23, 1), (14, 2, 15, 19)],
    [(113, 3, 114, 4), (44, 3, 45, 11), (21, 17, 22, 4), (13, 9, 14, 16)],
    [(107, 3, 108, 5), (41, 3, 42, 13), (24, 15, 25, 5), (15, 15, 16, 10)],
    [(116, 4, 117, 4), (42, 17, 0, 0), (22, 17, 23, 6), (16, 19, 17, 6)],
    [(111, 2, 112, 7), (46, 17, 0, 0), (24, 7, 25, 16), (13, 34, 0, 0)],
    [(121, 4, 122, 5), (47, 4, 48, 14), (24, 11, 25, 14), (15, 16, 16, 14)],
    [(117, 6, 118, 4), (45, 6, 46, 14), (24, 11, 25, 16), (16, 30, 17, 2)],
    [(106, 8, 107, 4), (47, 8, 48, 13), (24, 7, 25, 22), (15, 22, 16, 13)],
    [(114, 10, 115, 2), (46, 19, 47, 4), (22, 28, 23, 6), (16, 33, 17, 4)],
    [(122, 8, 123, 4), (45, 22, 46, 3), (23, 8, 24, 26), (15, 12, 16, 28)],
    [(117, 3, 118, 10), (45, 3, 46, 23), (24, 4, 25, 31), (15, 11, 16, 31)],
    [(116, 7, 117, 7), (45, 21, 46, 7), (23, 1, 24, 37), (15, 19, 16, 26)],
    [(115, 5, 116, 10), (47, 19, 48, 10), (24, 15, 25, 25), (15, 23, 16, 25)],
    [(115, 13, 116, 3), (46, 2, 47, 29), (24, 42, 25, 1), (15, 23, 16, 28)],
    [(115, 17, 0, 0), (46, 10, 47, 23), (24, 10, 25, 35), (15, 19, 16, 35)],
    [(115, 17, 116, 1), (46, 14, 47, 21), (24, 29, 25, 19), (15, 11, 16, 46)],
    [(115, 13, 116, 6), (46, 14, 47, 23), (24, 44, 25, 7), (16, 59, 17, 1)],
    [(121, 12, 122, 7), (47, 12, 48, 26), (24, 39, 25, 14), (15, 22, 16, 41)],
    [(121, 6, 122, 14), (47, 6, 48, 34), (24, 46, 25, 10), (15, 2, 16, 64)],
    [(122, 17, 123, 4), (46, 29, 47, 14), (24, 49, 25, 10), (15, 24, 16, 46)],
    [(122, 4, 123, 18), (46, 13, 47, 32), (24, 48, 25, 14), (15, 42, 16, 32)],
    [(117, 20, 118, 4), (47, 40, 48, 7), (24, 43, 25, 22), (15, 10, 16, 67)],
    [(118, 19, 119, 6), (47, 18, 48, 31), (24, 34, 25, 34), (15, 20, 16, 61)],
];

static ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Golay-protected patterns as tabulated in the standard, not recomputed.
// Indexed by version - 7.
static VERSION_INFOS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D, 0x0F928, 0x10B78,
    0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB,
    0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B,
    0x2542E, 0x26A64, 0x27541, 0x28C69,
];

// BCH-encoded, already XORed with the format mask 0x5412.
// Indexed by (ec_level_bits << 3) | mask_pattern.
static FORMAT_INFOS: [u32; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, 0x77C4, 0x72F3, 0x7DAA,
    0x789D, 0x662F, 0x6318, 0x6C41, 0x6976, 0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255,
    0x0D0C, 0x083B, 0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED,
];

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_width() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            assert_eq!(ver.width(), 4 * v as usize + 17);
        }
    }

    #[test]
    fn test_invalid_version() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion(0)));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion(41)));
    }

    // Every (version, level) row must account for exactly the total codeword
    // capacity of the symbol.
    #[test]
    fn test_block_table_consistency() {
        for v in 1..=40 {
            let ver = Version::new(v).unwrap();
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let (size1, count1, size2, count2) = ver.data_codewords_per_block(ecl);
                let data = size1 * count1 + size2 * count2;
                let ec = (count1 + count2) * ver.ecc_per_block(ecl);
                assert_eq!(
                    data + ec,
                    ver.total_codewords(),
                    "version {v} level {ecl:?}: {data} data + {ec} ec"
                );
                if size2 > 0 {
                    assert_eq!(size2, size1 + 1, "version {v} level {ecl:?}");
                }
            }
        }
    }

    #[test]
    fn test_alignment_pattern_positions() {
        assert!(Version(1).alignment_pattern().is_empty());
        for v in 2..=40 {
            let ver = Version(v);
            let poses = ver.alignment_pattern();
            assert_eq!(poses[0], 6);
            assert_eq!(*poses.last().unwrap(), ver.width() - 7);
        }
    }

    #[test_case(1, 0)]
    #[test_case(4, 7)]
    #[test_case(7, 0)]
    #[test_case(14, 3)]
    #[test_case(21, 4)]
    #[test_case(28, 3)]
    #[test_case(35, 0)]
    #[test_case(40, 0)]
    fn test_remainder_bits(version: u8, expected: usize) {
        assert_eq!(Version(version).remainder_bits(), expected);
    }

    #[test]
    fn test_char_count_bits() {
        assert_eq!(Version(1).char_count_bits(Mode::Numeric), 10);
        assert_eq!(Version(1).char_count_bits(Mode::Alphanumeric), 9);
        assert_eq!(Version(1).char_count_bits(Mode::Byte), 8);
        assert_eq!(Version(10).char_count_bits(Mode::Numeric), 12);
        assert_eq!(Version(26).char_count_bits(Mode::Byte), 16);
        assert_eq!(Version(27).char_count_bits(Mode::Alphanumeric), 13);
        assert_eq!(Version(40).char_count_bits(Mode::Numeric), 14);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(Version(7).info(), 0x07C94);
        assert_eq!(Version(18).info(), 0x12A17);
        assert_eq!(Version(40).info(), 0x28C69);
    }

    #[test]
    fn test_format_info() {
        assert_eq!(format_info(ECLevel::M, MaskPattern::new(0)), 0x5412);
        assert_eq!(format_info(ECLevel::L, MaskPattern::new(0)), 0x77C4);
        assert_eq!(format_info(ECLevel::H, MaskPattern::new(0)), 0x1689);
        assert_eq!(format_info(ECLevel::Q, MaskPattern::new(0)), 0x355F);
        assert_eq!(format_info(ECLevel::Q, MaskPattern::new(7)), 0x2BED);
    }

    #[test]
    fn test_data_capacity_known_values() {
        // Well-known capacities: version 1-L holds 19 data codewords,
        // version 40-L 2956 and version 40-H 1276.
        assert_eq!(Version(1).total_data_codewords(ECLevel::L), 19);
        assert_eq!(Version(1).total_data_codewords(ECLevel::Q), 13);
        assert_eq!(Version(40).total_data_codewords(ECLevel::L), 2956);
        assert_eq!(Version(40).total_data_codewords(ECLevel::H), 1276);
    }
}
