use std::ops::Deref;

use log::debug;

use crate::builder::matrix::Matrix;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(pub(crate) u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: usize, c: usize) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: usize, _: usize) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: usize, c: usize) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: usize, c: usize) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: usize, c: usize) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: usize, c: usize) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: usize, c: usize) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: usize, c: usize) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub(crate) fn mask_function(self) -> fn(usize, usize) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

// Masking and mask selection
//------------------------------------------------------------------------------

/// Flips every unreserved module where the mask formula holds. Applying the
/// same pattern twice restores the matrix.
pub(crate) fn apply_mask(matrix: &mut Matrix, pattern: MaskPattern) {
    let f = pattern.mask_function();
    for r in 0..matrix.size() {
        for c in 0..matrix.size() {
            if f(r, c) {
                matrix.xor(r, c, true);
            }
        }
    }
}

/// Scores all eight patterns over the fully placed matrix and keeps the one
/// with the lowest total penalty, ties resolved towards the lowest index.
/// The matrix comes back unmasked.
pub(crate) fn find_best_mask(matrix: &mut Matrix) -> MaskPattern {
    let mut best = MaskPattern(0);
    let mut best_penalty = u32::MAX;
    for p in 0..8 {
        let pattern = MaskPattern(p);
        apply_mask(matrix, pattern);
        let penalty = compute_total_penalty(matrix);
        apply_mask(matrix, pattern);
        if penalty < best_penalty {
            best_penalty = penalty;
            best = pattern;
        }
    }
    debug!("Picked mask {} with penalty {best_penalty}", *best);
    best
}

pub(crate) fn compute_total_penalty(matrix: &Matrix) -> u32 {
    compute_adjacent_penalty(matrix)
        + compute_block_penalty(matrix)
        + compute_finder_pattern_penalty(matrix)
        + compute_balance_penalty(matrix)
}

// Each run of 5 or more equal modules in a row or column scores
// 3 + (run length - 5).
fn compute_adjacent_penalty(matrix: &Matrix) -> u32 {
    let size = matrix.size();
    let mut pen = 0;
    for i in 0..size {
        pen += line_run_penalty((0..size).map(|j| matrix.get(i, j)));
        pen += line_run_penalty((0..size).map(|j| matrix.get(j, i)));
    }
    pen
}

fn line_run_penalty(line: impl Iterator<Item = bool>) -> u32 {
    let mut pen = 0;
    let mut run = 0u32;
    let mut last = None;
    for module in line {
        if last == Some(module) {
            run += 1;
        } else {
            if run >= 5 {
                pen += run - 2;
            }
            last = Some(module);
            run = 1;
        }
    }
    if run >= 5 {
        pen += run - 2;
    }
    pen
}

// Each 2x2 block of equal modules scores 3.
fn compute_block_penalty(matrix: &Matrix) -> u32 {
    let size = matrix.size();
    let mut pen = 0;
    for r in 0..size - 1 {
        for c in 0..size - 1 {
            let module = matrix.get(r, c);
            if module == matrix.get(r + 1, c)
                && module == matrix.get(r, c + 1)
                && module == matrix.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Each 1:1:3:1:1 finder-like sequence with a 4-module light flank, in either
// orientation, scores 40.
fn compute_finder_pattern_penalty(matrix: &Matrix) -> u32 {
    const PATTERN_LEADING: u16 = 0b10111010000;
    const PATTERN_TRAILING: u16 = 0b00001011101;

    let size = matrix.size();
    let mut pen = 0;
    for i in 0..size {
        let mut row_window = 0u16;
        let mut col_window = 0u16;
        for j in 0..size {
            row_window = ((row_window << 1) | matrix.get(i, j) as u16) & 0x7FF;
            col_window = ((col_window << 1) | matrix.get(j, i) as u16) & 0x7FF;
            if j >= 10 {
                if row_window == PATTERN_LEADING || row_window == PATTERN_TRAILING {
                    pen += 40;
                }
                if col_window == PATTERN_LEADING || col_window == PATTERN_TRAILING {
                    pen += 40;
                }
            }
        }
    }
    pen
}

// Deviation of the dark module ratio from 50%, in steps of 5%, scores 10 per
// step.
fn compute_balance_penalty(matrix: &Matrix) -> u32 {
    let dark = matrix.dark_count();
    let steps = (dark * 20).div_ceil(matrix.total_count()) as i32;
    (steps - 10).unsigned_abs() * 10
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0, &[(0, 0, true), (0, 1, false), (1, 0, false), (1, 1, true)])]
    #[test_case(1, &[(0, 5, true), (1, 5, false), (2, 5, true)])]
    #[test_case(2, &[(5, 0, true), (5, 1, false), (5, 3, true)])]
    #[test_case(3, &[(0, 0, true), (1, 2, true), (2, 2, false)])]
    #[test_case(4, &[(0, 0, true), (0, 2, true), (0, 3, false), (2, 0, false)])]
    #[test_case(5, &[(0, 0, true), (0, 1, true), (1, 1, false), (1, 2, false)])]
    #[test_case(6, &[(0, 0, true), (1, 1, true), (2, 3, true), (1, 3, false)])]
    #[test_case(7, &[(0, 0, true), (0, 1, false), (2, 1, false), (3, 1, true)])]
    fn test_mask_functions(pattern: u8, probes: &[(usize, usize, bool)]) {
        let f = MaskPattern::new(pattern).mask_function();
        for &(r, c, expected) in probes {
            assert_eq!(f(r, c), expected, "pattern {pattern} at ({r}, {c})");
        }
    }

    #[test]
    fn test_apply_mask_is_self_inverse() {
        let mut m = Matrix::new(21);
        m.set(2, 3, true, false);
        m.set(8, 8, true, true);
        m.set(10, 15, true, false);
        let before = m.clone();
        for p in 0..8 {
            apply_mask(&mut m, MaskPattern::new(p));
            apply_mask(&mut m, MaskPattern::new(p));
            for r in 0..21 {
                for c in 0..21 {
                    assert_eq!(m.get(r, c), before.get(r, c), "pattern {p} at ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_apply_mask_skips_reserved() {
        let mut m = Matrix::new(21);
        m.set(0, 0, true, true);
        apply_mask(&mut m, MaskPattern::new(0));
        assert!(m.get(0, 0));
        assert!(m.get(0, 2), "Unreserved module on the formula must flip");
    }

    #[test]
    fn test_adjacent_penalty() {
        // Every row and column of an empty 6x6 matrix is one run of 6.
        let m = Matrix::new(6);
        assert_eq!(compute_adjacent_penalty(&m), 12 * 4);
        // One dark module breaks its row and column into sub-5 runs, leaving
        // 10 unbroken lines.
        let mut m = Matrix::new(6);
        m.set(2, 3, true, false);
        assert_eq!(compute_adjacent_penalty(&m), 10 * 4);
    }

    #[test]
    fn test_block_penalty() {
        let m = Matrix::new(6);
        assert_eq!(compute_block_penalty(&m), 25 * 3);
        let mut m = Matrix::new(2);
        m.set(0, 0, true, false);
        assert_eq!(compute_block_penalty(&m), 0);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut m = Matrix::new(12);
        for c in [0, 2, 3, 4, 6] {
            m.set(0, c, true, false);
        }
        assert_eq!(compute_finder_pattern_penalty(&m), 40);
    }

    #[test]
    fn test_balance_penalty() {
        let m = Matrix::new(6);
        assert_eq!(compute_balance_penalty(&m), 100);
        let mut m = Matrix::new(2);
        m.set(0, 0, true, false);
        m.set(1, 1, true, false);
        assert_eq!(compute_balance_penalty(&m), 0);
    }
}
