pub mod matrix;
pub mod qr;

use log::debug;

use crate::common::bitstream::BitStream;
use crate::common::codec;
use crate::common::ec::ReedSolomon;
use crate::common::error::{QRError, QRResult};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{ECLevel, Version};
use self::qr::QRCode;

// QR builder
//------------------------------------------------------------------------------

/// Configures and runs the encoding pipeline. Mode, version and mask are
/// detected automatically unless pinned.
#[derive(Debug)]
pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: ECLevel::M, mask: None }
    }

    /// Pins the version instead of searching for the smallest fit.
    pub fn version(mut self, version: u8) -> QRResult<Self> {
        self.version = Some(Version::new(version)?);
        Ok(self)
    }

    pub fn ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Forces a masking pattern, skipping penalty evaluation.
    pub fn mask(mut self, pattern: u8) -> QRResult<Self> {
        if pattern > 7 {
            return Err(QRError::InvalidMaskPattern(pattern));
        }
        self.mask = Some(MaskPattern::new(pattern));
        Ok(self)
    }

    pub fn build(self) -> QRResult<QRCode> {
        let data = codec::to_latin1(self.text)?;
        let mode = codec::detect_mode(&data);
        let ec_level = self.ec_level;
        let version = match self.version {
            Some(version) => {
                if codec::encoded_len(data.len(), mode, version)
                    > version.data_bit_capacity(ec_level)
                {
                    return Err(QRError::DataTooLong);
                }
                version
            }
            None => codec::find_version(data.len(), mode, ec_level)?,
        };

        let stream = codec::encode(&data, mode, version, ec_level);
        let payload = interleave(stream.data(), version, ec_level);

        let encoded_bit_len = codec::encoded_len(data.len(), mode, version);
        let mut qr = QRCode::new(version, ec_level, mode, encoded_bit_len);
        qr.draw_function_patterns();
        qr.place_payload(&payload);
        let pattern = match self.mask {
            Some(pattern) => {
                qr.apply_mask(pattern);
                pattern
            }
            None => qr.apply_best_mask(),
        };
        qr.draw_format_info(pattern);

        debug!(
            "Built {mode:?} symbol: version {}, {ec_level:?}, mask {}",
            *version, *pattern
        );
        Ok(qr)
    }
}

/// Encodes `text` at the given error correction level with mode, version and
/// mask detected automatically.
pub fn encode(text: &str, ec_level: ECLevel) -> QRResult<QRCode> {
    QRBuilder::new(text).ec_level(ec_level).build()
}

// Blocking and interleaving
//------------------------------------------------------------------------------

/// Splits the padded data codewords into blocks per the group table.
fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (size1, count1, size2, count2) = version.data_codewords_per_block(ec_level);
    let group1_len = size1 * count1;

    debug_assert!(
        data.len() == group1_len + size2 * count2,
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        group1_len + size2 * count2
    );

    let mut blocks = Vec::with_capacity(count1 + count2);
    blocks.extend(data[..group1_len].chunks(size1));
    if size2 > 0 {
        blocks.extend(data[group1_len..].chunks(size2));
    }
    blocks
}

/// Computes per-block error correction and interleaves data then ec
/// codewords column-major, remainder bits appended.
fn interleave(data: &[u8], version: Version, ec_level: ECLevel) -> BitStream {
    let blocks = blockify(data, version, ec_level);
    let rs = ReedSolomon::new(version.ecc_per_block(ec_level));
    let ecc_blocks: Vec<Vec<u8>> = blocks.iter().map(|b| rs.encode(b)).collect();

    let mut payload =
        BitStream::new(version.total_codewords() * 8 + version.remainder_bits());
    let longest = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    for i in 0..longest {
        for block in &blocks {
            if let Some(&codeword) = block.get(i) {
                payload.extend(&[codeword]);
            }
        }
    }
    for i in 0..version.ecc_per_block(ec_level) {
        for block in &ecc_blocks {
            payload.extend(&[block[i]]);
        }
    }
    payload.push_bits(0, version.remainder_bits());
    payload
}
