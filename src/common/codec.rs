use log::debug;

use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Mode
//------------------------------------------------------------------------------

/// Data encoding mode. Kanji and ECI are not supported; text outside
/// ISO 8859-1 is rejected before encoding.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
}

impl Mode {
    pub(crate) const fn indicator(self) -> u16 {
        match self {
            Self::Numeric => 0b0001,
            Self::Alphanumeric => 0b0010,
            Self::Byte => 0b0100,
        }
    }

    /// Bit length of `len` characters encoded in this mode, excluding the
    /// mode and count indicators.
    pub(crate) const fn data_bits(self, len: usize) -> usize {
        match self {
            Self::Numeric => (len / 3) * 10 + [0, 4, 7][len % 3],
            Self::Alphanumeric => (len / 2) * 11 + (len % 2) * 6,
            Self::Byte => len * 8,
        }
    }
}

/// Picks the tightest mode covering every character. Empty input falls back
/// to byte mode.
pub(crate) fn detect_mode(data: &[u8]) -> Mode {
    if data.is_empty() {
        Mode::Byte
    } else if data.iter().all(u8::is_ascii_digit) {
        Mode::Numeric
    } else if data.iter().all(|&b| alphanumeric_index(b).is_some()) {
        Mode::Alphanumeric
    } else {
        Mode::Byte
    }
}

/// Index into the 45-character alphanumeric charset, `None` for outsiders.
fn alphanumeric_index(b: u8) -> Option<u16> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u16),
        b'A'..=b'Z' => Some((b - b'A') as u16 + 10),
        b' ' => Some(36),
        b'$' => Some(37),
        b'%' => Some(38),
        b'*' => Some(39),
        b'+' => Some(40),
        b'-' => Some(41),
        b'.' => Some(42),
        b'/' => Some(43),
        b':' => Some(44),
        _ => None,
    }
}

/// Maps text to its ISO 8859-1 bytes, rejecting characters above U+00FF.
pub(crate) fn to_latin1(text: &str) -> QRResult<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c as u32).map_err(|_| QRError::UnsupportedCharacter(c)))
        .collect()
}

// Version search
//------------------------------------------------------------------------------

/// Full segment length in bits: mode indicator, count indicator and data.
pub(crate) fn encoded_len(data_len: usize, mode: Mode, version: Version) -> usize {
    version.mode_bits() + version.char_count_bits(mode) + mode.data_bits(data_len)
}

/// Smallest version whose data capacity fits the segment at the given level.
pub(crate) fn find_version(
    data_len: usize,
    mode: Mode,
    ec_level: ECLevel,
) -> QRResult<Version> {
    for v in 1..=40 {
        let version = Version(v);
        if encoded_len(data_len, mode, version) <= version.data_bit_capacity(ec_level) {
            debug!("Picked version {v} for {data_len} {mode:?} characters at {ec_level:?}");
            return Ok(version);
        }
    }
    Err(QRError::DataTooLong)
}

// Bit stream assembly
//------------------------------------------------------------------------------

static PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Assembles the complete data bit stream: header, data groups and padding up
/// to the exact capacity of the chosen version and level.
pub(crate) fn encode(data: &[u8], mode: Mode, version: Version, ec_level: ECLevel) -> BitStream {
    let capacity = version.data_bit_capacity(ec_level);
    debug_assert!(
        encoded_len(data.len(), mode, version) <= capacity,
        "Data overflows the version capacity: Data len {}, Capacity {capacity}",
        data.len()
    );

    let mut bs = BitStream::new(capacity);
    bs.push_bits(mode.indicator(), version.mode_bits());
    bs.push_bits(data.len() as u16, version.char_count_bits(mode));
    match mode {
        Mode::Numeric => push_numeric_data(&mut bs, data),
        Mode::Alphanumeric => push_alphanumeric_data(&mut bs, data),
        Mode::Byte => push_byte_data(&mut bs, data),
    }
    pad(&mut bs);
    bs
}

fn push_numeric_data(bs: &mut BitStream, data: &[u8]) {
    for group in data.chunks(3) {
        let value = group.iter().fold(0u16, |acc, b| acc * 10 + (b - b'0') as u16);
        bs.push_bits(value, [0, 4, 7, 10][group.len()]);
    }
}

fn push_alphanumeric_data(bs: &mut BitStream, data: &[u8]) {
    for pair in data.chunks(2) {
        // Outsiders are filtered out by mode detection.
        let mut value = alphanumeric_index(pair[0]).unwrap_or(0);
        let mut size = 6;
        if let Some(&second) = pair.get(1) {
            value = value * 45 + alphanumeric_index(second).unwrap_or(0);
            size = 11;
        }
        bs.push_bits(value, size);
    }
}

fn push_byte_data(bs: &mut BitStream, data: &[u8]) {
    for &byte in data {
        bs.push_bits(byte as u16, 8);
    }
}

/// Pads the stream to its full capacity. A shortfall of at most 4 bits is
/// absorbed with zeros; otherwise the stream is zero padded to a byte
/// boundary and filled with alternating padding codewords.
fn pad(bs: &mut BitStream) {
    let shortfall = bs.capacity() - bs.len();
    if shortfall <= 4 {
        bs.push_bits(0, shortfall);
        return;
    }

    let offset = bs.len() & 7;
    if offset != 0 {
        bs.push_bits(0, 8 - offset);
    }
    for &codeword in PADDING_CODEWORDS.iter().cycle() {
        if bs.len() == bs.capacity() {
            break;
        }
        bs.push_bits(codeword as u16, 8);
    }
}
