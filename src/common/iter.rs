use std::sync::LazyLock;

use serde::Serialize;

use super::metadata::{TIMING_LINE, TOTAL_BIT_CAPACITY, WIDTH};

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Zigzag over every module: column pairs right to left, skipping the vertical
// timing column, alternating direction per pair and starting upward
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
    vert_timing_col: i16,
}

impl EncRegionIter {
    pub const fn new() -> Self {
        let w = WIDTH as i16;
        Self { r: w - 1, c: w - 1, width: w, vert_timing_col: TIMING_LINE }
    }
}

impl Default for EncRegionIter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        let adjusted_col = if self.c <= self.vert_timing_col { self.c + 1 } else { self.c };
        if self.c < 0 {
            return None;
        }
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == self.vert_timing_col + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

// Modules claimed by finder, separator, format info, timing and the dark module.
// Version 1 has no alignment or version info regions.
pub fn is_reserved(r: i16, c: i16) -> bool {
    let w = WIDTH as i16;
    let near_top = r <= 8;
    let near_left = c <= 8;
    let near_right = c >= w - 8;
    let near_bottom = r >= w - 8;
    (near_top && (near_left || near_right))
        || (near_bottom && near_left)
        || r == TIMING_LINE
        || c == TIMING_LINE
}

// Data position index
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct DataPosition {
    pub row: i16,
    pub col: i16,
    // 1-based order of visit
    pub seq: usize,
}

pub static DATA_POSITIONS: LazyLock<Vec<DataPosition>> = LazyLock::new(|| {
    let positions: Vec<DataPosition> = EncRegionIter::new()
        .filter(|&(r, c)| !is_reserved(r, c))
        .enumerate()
        .map(|(i, (row, col))| DataPosition { row, col, seq: i + 1 })
        .collect();
    assert_eq!(positions.len(), TOTAL_BIT_CAPACITY, "Data position index is corrupt");
    positions
});

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::{is_reserved, EncRegionIter, DATA_POSITIONS};
    use crate::common::metadata::WIDTH;

    #[test]
    fn test_enc_region_iter_visits_all_but_timing_col() {
        let coords: Vec<_> = EncRegionIter::new().collect();
        assert_eq!(coords.len(), WIDTH * (WIDTH - 1));
        assert!(coords.iter().all(|&(_, c)| c != 6));
        let unique: HashSet<_> = coords.iter().collect();
        assert_eq!(unique.len(), coords.len());
    }

    #[test]
    fn test_enc_region_iter_order() {
        let head: Vec<_> = EncRegionIter::new().take(6).collect();
        assert_eq!(head, vec![(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
        // Second column pair runs downward
        let turn: Vec<_> = EncRegionIter::new().skip(41).take(3).collect();
        assert_eq!(turn, vec![(0, 19), (0, 18), (0, 17)]);
    }

    #[test]
    fn test_reserved_modules() {
        assert!(is_reserved(8, 8));
        assert!(is_reserved(8, 13));
        assert!(is_reserved(13, 8));
        assert!(is_reserved(6, 10));
        assert!(is_reserved(10, 6));
        assert!(!is_reserved(9, 9));
        assert!(!is_reserved(12, 20));
        assert!(!is_reserved(20, 9));
        assert!(!is_reserved(0, 9));
    }

    #[test]
    fn test_data_positions() {
        assert_eq!(DATA_POSITIONS.len(), 208);
        let w = WIDTH as i16;
        assert!(DATA_POSITIONS.iter().all(|p| (0..w).contains(&p.row) && (0..w).contains(&p.col)));
        let unique: HashSet<_> = DATA_POSITIONS.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(unique.len(), 208);
        assert!(DATA_POSITIONS.iter().enumerate().all(|(i, p)| p.seq == i + 1));
    }

    #[test]
    fn test_data_positions_ends() {
        let coords: Vec<_> = DATA_POSITIONS.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(coords[..4], [(20, 20), (20, 19), (19, 20), (19, 19)]);
        assert_eq!(coords[205..], [(11, 0), (12, 1), (12, 0)]);
    }
}
