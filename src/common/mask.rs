use std::fmt::{Display, Formatter};

use log::debug;
use rayon::prelude::*;

use super::error::QRError;
use super::metadata::Color;
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    Checkerboard = 0,
    HorizontalLines = 1,
    VerticalLines = 2,
    DiagonalLines = 3,
    LargeCheckerboard = 4,
    Fields = 5,
    Diamonds = 6,
    Meadow = 7,
}

impl MaskPattern {
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Checkerboard,
        MaskPattern::HorizontalLines,
        MaskPattern::VerticalLines,
        MaskPattern::DiagonalLines,
        MaskPattern::LargeCheckerboard,
        MaskPattern::Fields,
        MaskPattern::Diamonds,
        MaskPattern::Meadow,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    // True if the data module at row r, column c is flipped
    pub fn applies(self, r: usize, c: usize) -> bool {
        let f = match self {
            MaskPattern::Checkerboard => mask_functions::checkerboard,
            MaskPattern::HorizontalLines => mask_functions::horizontal_lines,
            MaskPattern::VerticalLines => mask_functions::vertical_lines,
            MaskPattern::DiagonalLines => mask_functions::diagonal_lines,
            MaskPattern::LargeCheckerboard => mask_functions::large_checkerboard,
            MaskPattern::Fields => mask_functions::fields,
            MaskPattern::Diamonds => mask_functions::diamonds,
            MaskPattern::Meadow => mask_functions::meadow,
        };
        f(r, c)
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QRError;
    fn try_from(pattern: u8) -> Result<Self, Self::Error> {
        MaskPattern::ALL
            .get(pattern as usize)
            .copied()
            .ok_or(QRError::InvalidMaskingPattern(pattern))
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.index(), self)
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


// Penalty
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct Penalty {
    // Runs of 5 or more same colored modules
    pub adjacent: u32,
    // 2x2 same colored blocks
    pub block: u32,
    // Finder-like 1:1:3:1:1 patterns with 4 light modules on one side
    pub finder: u32,
    // Deviation of dark module ratio from 50%
    pub balance: u32,
}

impl Penalty {
    pub fn total(&self) -> u32 {
        self.adjacent + self.block + self.finder + self.balance
    }
}

static FINDER_LIKE: [Color; 11] = {
    use Color::{Dark as D, Light as L};
    [D, L, D, D, D, L, D, L, L, L, L]
};

static FINDER_LIKE_MIRROR: [Color; 11] = {
    use Color::{Dark as D, Light as L};
    [L, L, L, L, D, L, D, D, D, L, D]
};

// Modules that are neither dark nor light yet, count as light
pub fn compute_penalty(qr: &QR) -> Penalty {
    let w = qr.width();
    let grid: Vec<Color> = (0..w)
        .flat_map(|r| (0..w).map(move |c| (r, c)))
        .map(|(r, c)| *qr.get(r as i16, c as i16))
        .collect();
    compute_grid_penalty(&grid, w)
}

fn compute_grid_penalty(grid: &[Color], w: usize) -> Penalty {
    debug_assert!(grid.len() == w * w, "Grid isn't square: Len {}, Width {w}", grid.len());
    Penalty {
        adjacent: compute_adjacent_penalty(grid, w),
        block: compute_block_penalty(grid, w),
        finder: compute_finder_pattern_penalty(grid, w),
        balance: compute_balance_penalty(grid),
    }
}

fn run_penalty(line: impl Iterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = None;
    let mut run = 0;
    for clr in line {
        if last == Some(clr) {
            run += 1;
            continue;
        }
        if run >= 5 {
            pen += run - 2;
        }
        last = Some(clr);
        run = 1;
    }
    if run >= 5 {
        pen += run - 2;
    }
    pen
}

fn compute_adjacent_penalty(grid: &[Color], w: usize) -> u32 {
    let rows: u32 = (0..w).map(|r| run_penalty(grid[r * w..(r + 1) * w].iter().copied())).sum();
    let cols: u32 = (0..w).map(|c| run_penalty((0..w).map(|r| grid[r * w + c]))).sum();
    rows + cols
}

fn compute_block_penalty(grid: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = grid[r * w + c];
            if clr == grid[r * w + c + 1]
                && clr == grid[(r + 1) * w + c]
                && clr == grid[(r + 1) * w + c + 1]
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(grid: &[Color], w: usize) -> u32 {
    let len = FINDER_LIKE.len();
    if w < len {
        return 0;
    }
    let count_matches = |get: &dyn Fn(usize) -> Color| {
        (0..=w - len)
            .filter(|&j| {
                let window = (j..j + len).map(get);
                window.clone().eq(FINDER_LIKE.iter().copied())
                    || window.eq(FINDER_LIKE_MIRROR.iter().copied())
            })
            .count() as u32
    };
    let mut pen = 0;
    for i in 0..w {
        pen += 40 * count_matches(&|c| grid[i * w + c]);
        pen += 40 * count_matches(&|r| grid[r * w + i]);
    }
    pen
}

fn compute_balance_penalty(grid: &[Color]) -> u32 {
    let total = grid.len();
    let dark = grid.iter().filter(|&&c| c == Color::Dark).count();
    let percent = (dark * 100 / total) as i32;
    let prev = percent - percent % 5;
    let next = prev + 5;
    let dev = (prev - 50).abs().min((next - 50).abs());
    (dev / 5 * 10) as u32
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_grid_penalty, run_penalty, Color, FINDER_LIKE,
        FINDER_LIKE_MIRROR,
    };
    use Color::{Dark as D, Light as L};

    fn grid_with_dark(w: usize, dark: usize) -> Vec<Color> {
        (0..w * w).map(|i| if i < dark { D } else { L }).collect()
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(run_penalty([L, L, L, L].into_iter()), 0);
        assert_eq!(run_penalty([L, L, L, L, L].into_iter()), 3);
        assert_eq!(run_penalty([D, L, L, L, L, L, L, D].into_iter()), 4);
        assert_eq!(run_penalty([D; 5].into_iter().chain([L; 7])), 3 + 5);
    }

    #[test]
    fn test_all_light() {
        let w = 21;
        let grid = vec![L; w * w];
        let pen = compute_grid_penalty(&grid, w);
        assert_eq!(pen.adjacent, 19 * 21 * 2);
        assert_eq!(pen.block, 20 * 20 * 3);
        assert_eq!(pen.finder, 0);
        assert_eq!(pen.balance, 90);
        assert_eq!(pen.total(), 798 + 1200 + 90);
    }

    #[test]
    fn test_checkerboard_has_no_runs() {
        let w = 6;
        let grid: Vec<_> = (0..w * w).map(|i| Color::from((i / w + i % w) % 2 == 0)).collect();
        assert_eq!(compute_adjacent_penalty(&grid, w), 0);
        assert_eq!(compute_block_penalty(&grid, w), 0);
    }

    #[test]
    fn test_block_penalty() {
        let w = 3;
        let grid = vec![D, D, L, D, D, L, L, D, D];
        assert_eq!(compute_block_penalty(&grid, w), 3);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let w = 11;
        for pattern in [FINDER_LIKE, FINDER_LIKE_MIRROR] {
            let mut grid = vec![L; w * w];
            grid[..w].copy_from_slice(&pattern);
            assert_eq!(compute_finder_pattern_penalty(&grid, w), 40);
        }
    }

    #[test]
    fn test_finder_pattern_penalty_vertical() {
        let w = 11;
        let mut grid = vec![L; w * w];
        for (r, &clr) in FINDER_LIKE.iter().enumerate() {
            grid[r * w + 3] = clr;
        }
        assert_eq!(compute_finder_pattern_penalty(&grid, w), 40);
    }

    #[test]
    fn test_finder_pattern_penalty_without_light_run() {
        let w = 11;
        let mut grid = vec![L; w * w];
        grid[..7].copy_from_slice(&[D, L, D, D, D, L, D]);
        grid[8] = D;
        assert_eq!(compute_finder_pattern_penalty(&grid, w), 0);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 50)), 0);
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 45)), 0);
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 53)), 0);
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 62)), 20);
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 30)), 30);
        assert_eq!(compute_balance_penalty(&grid_with_dark(10, 100)), 100);
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Scores every pattern on a copy of the symbol. Ties go to the lowest index.
pub fn select_mask(qr: &QR) -> (MaskPattern, Penalty) {
    let scores: Vec<(MaskPattern, Penalty)> = MaskPattern::ALL
        .par_iter()
        .map(|&mask| {
            let mut trial = qr.clone();
            trial.apply_mask(mask);
            let pen = compute_penalty(&trial);
            debug!("Mask {mask}: penalty {} {pen:?}", pen.total());
            (mask, pen)
        })
        .collect();
    scores
        .into_iter()
        .min_by_key(|(mask, pen)| (pen.total(), mask.index()))
        .expect("Should return atleast 1 mask")
}

pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let (best_mask, pen) = select_mask(qr);
    debug!("Selected mask {best_mask} with penalty {}", pen.total());
    qr.apply_mask(best_mask);
    best_mask
}
