// Module matrix
//------------------------------------------------------------------------------

/// Square module grid with a parallel reservation grid. Function patterns
/// reserve their cells as they are drawn; reserved cells ignore later value
/// writes and masking.
#[derive(Debug, Clone)]
pub struct Matrix {
    size: usize,
    values: Vec<bool>,
    reserved: Vec<bool>,
}

impl Matrix {
    pub(crate) fn new(size: usize) -> Self {
        Self { size, values: vec![false; size * size], reserved: vec![false; size * size] }
    }

    /// Modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, r: usize, c: usize) -> usize {
        assert!(
            r < self.size && c < self.size,
            "Module ({r}, {c}) out of bounds for size {}",
            self.size
        );
        r * self.size + c
    }

    /// `true` is a dark module.
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.values[self.index(r, c)]
    }

    /// Writes a module. The value only lands while the cell is unreserved;
    /// the `reserve` flag always overwrites the reservation state.
    pub(crate) fn set(&mut self, r: usize, c: usize, value: bool, reserve: bool) {
        let i = self.index(r, c);
        if !self.reserved[i] {
            self.values[i] = value;
        }
        self.reserved[i] = reserve;
    }

    /// Flips the module unless it is reserved.
    pub(crate) fn xor(&mut self, r: usize, c: usize, value: bool) {
        let i = self.index(r, c);
        if !self.reserved[i] {
            self.values[i] ^= value;
        }
    }

    pub(crate) fn mark_reserved(&mut self, r: usize, c: usize, flag: bool) {
        let i = self.index(r, c);
        self.reserved[i] = flag;
    }

    pub fn is_reserved(&self, r: usize, c: usize) -> bool {
        self.reserved[self.index(r, c)]
    }

    pub(crate) fn dark_count(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    pub(crate) fn total_count(&self) -> usize {
        self.size * self.size
    }

    /// Row-major view for renderers.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.values.chunks(self.size)
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::Matrix;

    #[test]
    fn test_set_get() {
        let mut m = Matrix::new(21);
        assert!(!m.get(0, 0));
        m.set(0, 0, true, false);
        assert!(m.get(0, 0));
        m.set(20, 20, true, false);
        assert!(m.get(20, 20));
    }

    #[test]
    fn test_reservation_blocks_writes() {
        let mut m = Matrix::new(21);
        m.set(3, 4, true, true);
        assert!(m.get(3, 4));
        assert!(m.is_reserved(3, 4));
        m.set(3, 4, false, true);
        assert!(m.get(3, 4), "Reserved module must keep its value");
    }

    #[test]
    fn test_reserve_flag_always_updates() {
        let mut m = Matrix::new(21);
        m.set(5, 5, true, true);
        // The value write is blocked but the flag is cleared.
        m.set(5, 5, false, false);
        assert!(m.get(5, 5));
        assert!(!m.is_reserved(5, 5));
        // A second write lands now that the cell is free.
        m.set(5, 5, false, false);
        assert!(!m.get(5, 5));
    }

    #[test]
    fn test_xor_gated_by_reservation() {
        let mut m = Matrix::new(21);
        m.xor(1, 2, true);
        assert!(m.get(1, 2));
        m.xor(1, 2, true);
        assert!(!m.get(1, 2));
        m.set(1, 2, true, true);
        m.xor(1, 2, true);
        assert!(m.get(1, 2), "Masking must not touch reserved modules");
    }

    #[test]
    fn test_dark_count() {
        let mut m = Matrix::new(5);
        assert_eq!(m.dark_count(), 0);
        m.set(0, 0, true, false);
        m.set(4, 4, true, true);
        assert_eq!(m.dark_count(), 2);
        assert_eq!(m.total_count(), 25);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        let m = Matrix::new(21);
        m.get(21, 0);
    }
}
