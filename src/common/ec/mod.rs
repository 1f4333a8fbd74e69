pub(crate) mod galois;
pub(crate) mod poly;

use galois::GF256;
use poly::Polynomial;

// Reed-Solomon error correction
//------------------------------------------------------------------------------

/// Error correction codeword generator for a fixed codeword count.
///
/// The generator polynomial is the product of `(x - 2^i)` for
/// `i in 0..ecc_count`, built once per block group and reused for every block.
pub(crate) struct ReedSolomon {
    ecc_count: usize,
    generator: Polynomial,
}

impl ReedSolomon {
    pub fn new(ecc_count: usize) -> Self {
        debug_assert!(ecc_count > 0, "Ecc count must be positive");

        let mut generator = Polynomial::new(vec![1]);
        for i in 0..ecc_count {
            generator = generator.mul(&Polynomial::new(vec![1, GF256.exp(i)]));
        }
        Self { ecc_count, generator }
    }

    /// Computes the error correction codewords for one data block. Always
    /// yields exactly `ecc_count` bytes; the remainder is front padded when
    /// its leading coefficients vanish.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut coefficients = data.to_vec();
        coefficients.resize(data.len() + self.ecc_count, 0);

        let remainder = Polynomial::new(coefficients).rem(&self.generator);
        let mut ecc = vec![0u8; self.ecc_count - remainder.len()];
        ecc.extend_from_slice(remainder.coefficients());
        ecc
    }
}

#[cfg(test)]
mod reed_solomon_tests {
    use super::*;

    #[test]
    fn test_generator_degree() {
        for n in [1, 7, 10, 30] {
            assert_eq!(ReedSolomon::new(n).generator.len(), n + 1);
        }
    }

    #[test]
    fn test_generator_monic() {
        assert_eq!(ReedSolomon::new(1).generator.coefficients(), [1, 1]);
        assert_eq!(ReedSolomon::new(2).generator.coefficients()[0], 1);
    }

    #[test]
    fn test_ecc_degree_10() {
        let rs = ReedSolomon::new(10);
        let ecc = rs.encode(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11");
        assert_eq!(&*ecc, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_ecc_degree_13() {
        let rs = ReedSolomon::new(13);
        let ecc = rs.encode(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec");
        assert_eq!(&*ecc, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_ecc_degree_18() {
        let rs = ReedSolomon::new(18);
        let ecc = rs.encode(b"CUF\x86W&U\xc2w2\x06\x12\x06g&");
        assert_eq!(&*ecc, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_ecc_length_is_exact() {
        let rs = ReedSolomon::new(17);
        for data in [&b"\x00"[..], b"\x00\x00\x00", b"\x40\xd2\x75\x47\x76\x17\x32\x06"] {
            assert_eq!(rs.encode(data).len(), 17);
        }
    }

    // A codeword (data followed by its ecc) is divisible by the generator.
    #[test]
    fn test_codeword_divisibility() {
        let rs = ReedSolomon::new(10);
        let data = b"\x10\x20\x0c\x56\x61\x80\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11";
        let mut codeword = data.to_vec();
        codeword.extend(rs.encode(data));
        let rem = Polynomial::new(codeword).rem(&rs.generator);
        assert!(rem.coefficients().is_empty());
    }
}
