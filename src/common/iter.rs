// Iterator over the encoding region in placement order
//------------------------------------------------------------------------------

/// Walks column pairs right to left, alternating upward and downward runs,
/// right cell before left within each row. The vertical timing column is
/// skipped entirely; reserved cells are filtered by the caller.
pub(crate) struct ZigZagIter {
    size: usize,
    // Right column of the current pair
    col: usize,
    row: usize,
    upward: bool,
    on_left: bool,
    done: bool,
}

impl ZigZagIter {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 7, "Symbol side shorter than a finder pattern");
        Self { size, col: size - 1, row: size - 1, upward: true, on_left: false, done: false }
    }

    fn advance_pair(&mut self) {
        self.upward = !self.upward;
        if self.col < 2 {
            self.done = true;
            return;
        }
        self.col -= 2;
        // Vertical timing column
        if self.col == 6 {
            self.col -= 1;
        }
    }
}

impl Iterator for ZigZagIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = (self.row, if self.on_left { self.col - 1 } else { self.col });

        if !self.on_left {
            self.on_left = true;
        } else {
            self.on_left = false;
            let at_edge = if self.upward { self.row == 0 } else { self.row == self.size - 1 };
            if at_edge {
                self.advance_pair();
            } else if self.upward {
                self.row -= 1;
            } else {
                self.row += 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::ZigZagIter;

    #[test]
    fn test_starts_bottom_right_upward() {
        let mut iter = ZigZagIter::new(21);
        assert_eq!(iter.next(), Some((20, 20)));
        assert_eq!(iter.next(), Some((20, 19)));
        assert_eq!(iter.next(), Some((19, 20)));
        assert_eq!(iter.next(), Some((19, 19)));
    }

    #[test]
    fn test_turns_downward_after_first_pair() {
        let iter = ZigZagIter::new(21);
        let cells: Vec<_> = iter.collect();
        // First pair ends at the top, second pair starts there going down.
        assert_eq!(cells[41], (0, 19));
        assert_eq!(cells[42], (0, 18));
        assert_eq!(cells[43], (0, 17));
        assert_eq!(cells[44], (1, 18));
    }

    #[test]
    fn test_covers_all_but_timing_column() {
        for size in [21, 25, 45, 177] {
            let cells: Vec<_> = ZigZagIter::new(size).collect();
            assert_eq!(cells.len(), size * (size - 1));
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), cells.len());
            assert!(cells.iter().all(|&(r, c)| r < size && c != 6 && c < size));
        }
    }
}
