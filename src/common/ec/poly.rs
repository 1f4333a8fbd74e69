use super::galois::GF256;

// Polynomial over GF(256)
//------------------------------------------------------------------------------

/// Polynomial with coefficients in GF(256), most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Polynomial(Vec<u8>);

impl Polynomial {
    pub fn new(coefficients: Vec<u8>) -> Self {
        Self(coefficients)
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Convolution product.
    pub fn mul(&self, other: &Self) -> Self {
        let mut res = vec![0u8; self.0.len() + other.0.len() - 1];
        for (i, &a) in self.0.iter().enumerate() {
            for (j, &b) in other.0.iter().enumerate() {
                res[i + j] ^= GF256.mul(a, b);
            }
        }
        Self(res)
    }

    /// Remainder of synthetic division by `divisor`, leading zeros stripped.
    pub fn rem(mut self, divisor: &Self) -> Self {
        debug_assert!(
            divisor.0.first().is_some_and(|&c| c != 0),
            "Divisor must have a nonzero leading coefficient"
        );

        let mut start = 0;
        while self.0.len() - start >= divisor.0.len() {
            let lead = self.0[start];
            if lead != 0 {
                for (u, &v) in self.0[start..].iter_mut().zip(divisor.0.iter()) {
                    *u ^= GF256.mul(v, lead);
                }
            }
            start += 1;
        }
        while start < self.0.len() && self.0[start] == 0 {
            start += 1;
        }
        Self(self.0.split_off(start))
    }
}

#[cfg(test)]
mod poly_tests {
    use super::Polynomial;

    #[test]
    fn test_mul() {
        // (x + 1)(x + 2) = x^2 + 3x + 2 in GF(256).
        let a = Polynomial::new(vec![1, 1]);
        let b = Polynomial::new(vec![1, 2]);
        assert_eq!(a.mul(&b).coefficients(), [1, 3, 2]);
    }

    #[test]
    fn test_mul_lengths() {
        let a = Polynomial::new(vec![5, 0, 7]);
        let b = Polynomial::new(vec![1, 2, 3, 4]);
        assert_eq!(a.mul(&b).len(), 6);
    }

    #[test]
    fn test_rem_exact_division() {
        // (x + 1)(x + 2) divided by (x + 1) leaves no remainder.
        let a = Polynomial::new(vec![1, 1]);
        let b = Polynomial::new(vec![1, 2]);
        let prod = a.mul(&b);
        assert!(prod.rem(&a).coefficients().is_empty());
    }

    #[test]
    fn test_rem_shorter_than_divisor() {
        let a = Polynomial::new(vec![7, 3]);
        let d = Polynomial::new(vec![1, 0, 0]);
        assert_eq!(a.rem(&d).coefficients(), [7, 3]);
    }

    #[test]
    fn test_rem_strips_leading_zeros() {
        // x^2 mod (x^2 + x) = x, a single surviving coefficient.
        let a = Polynomial::new(vec![1, 0, 0]);
        let d = Polynomial::new(vec![1, 1, 0]);
        assert_eq!(a.rem(&d).coefficients(), [1, 0]);
    }
}
