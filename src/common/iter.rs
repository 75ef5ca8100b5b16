use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Visits every module of the symbol in zigzag order: two-column strips from the
// right edge, alternating upward and downward, skipping the vertical timing column.
// Function modules are yielded too; the caller filters them out.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
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
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::common::metadata::Version;

    #[test]
    fn test_starts_bottom_right_moving_up() {
        let ver = Version::new(1).unwrap();
        let coords: Vec<_> = EncRegionIter::new(ver).take(6).collect();
        assert_eq!(coords, vec![(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_turns_at_top_edge() {
        let ver = Version::new(1).unwrap();
        let coords: Vec<_> = EncRegionIter::new(ver).skip(40).take(4).collect();
        assert_eq!(coords, vec![(0, 20), (0, 19), (0, 18), (0, 17)]);
    }

    #[test]
    fn test_visits_each_module_once_except_timing_col() {
        for ver in Version::all() {
            let w = ver.width() as i16;
            let coords: Vec<_> = EncRegionIter::new(ver).collect();
            let unique: HashSet<_> = coords.iter().copied().collect();
            assert_eq!(coords.len(), unique.len(), "Version {ver}");
            assert_eq!(coords.len(), (w * (w - 1)) as usize, "Version {ver}");
            assert!(coords.iter().all(|&(_, c)| c != 6), "Version {ver}");
        }
    }

    #[test]
    fn test_left_strip_after_timing_col() {
        let ver = Version::new(1).unwrap();
        let coords: Vec<_> = EncRegionIter::new(ver).collect();
        let pos = coords.iter().position(|&(_, c)| c == 5).unwrap();
        assert_eq!(coords[pos - 1], (0, 7));
        assert_eq!(&coords[pos..pos + 2], &[(0, 5), (0, 4)]);
        assert_eq!(coords.last(), Some(&(20, 0)));
    }
}
