// Galois field GF(256)
//------------------------------------------------------------------------------

/// Arithmetic over GF(2^8) with the primitive polynomial
/// x^8 + x^4 + x^3 + x^2 + 1 (0x11D).
pub(crate) struct GaloisField {
    exp: [u8; 256],
    log: [u8; 256],
}

impl GaloisField {
    const fn new() -> Self {
        let mut exp = [0u8; 256];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= 0x11D;
            }
            i += 1;
        }
        Self { exp, log }
    }

    /// Power of the generator element 2, exponent taken mod 255.
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i % 255]
    }

    /// Discrete log, defined for nonzero elements only.
    pub fn log(&self, x: u8) -> u8 {
        debug_assert!(x != 0, "Log of 0 is undefined");
        self.log[x as usize]
    }

    /// Product in GF(256). Zero operands short-circuit because their log is
    /// undefined.
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp(self.log[a as usize] as usize + self.log[b as usize] as usize)
    }
}

pub(crate) static GF256: GaloisField = GaloisField::new();
