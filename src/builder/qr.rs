use std::ops::Deref;

use crate::common::{
    bit_utils::BitStream,
    codec::{Mode, SymbolSpec},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::*,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
    // On the placement path but past the end of the message
    Unallocated,
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty | Module::Unallocated => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    spec: SymbolSpec,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(spec: SymbolSpec) -> Self {
        let w = spec.width();
        Self { grid: vec![Module::Empty; w * w], w, spec }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.spec.version
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.spec.ec_level
    }

    pub fn mode(&self) -> Mode {
        self.spec.mode
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.spec.mask
    }

    pub fn metadata(&self) -> SymbolSpec {
        self.spec
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                    Module::Unallocated => 'x',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative indices count from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_square_at(3, 3, 3);
        self.draw_square_at(3, -4, 3);
        self.draw_square_at(-4, 3, 3);
        self.draw_separators();
    }

    // Concentric square of alternating rings, dark on the outside and in the
    // center. The ring just inside the border is light.
    fn draw_square_at(&mut self, r: i16, c: i16, radius: i16) {
        for i in -radius..=radius {
            for j in -radius..=radius {
                let ring = i.abs().max(j.abs());
                let clr = if ring == radius - 1 { Color::Light } else { Color::Dark };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }

    fn draw_separators(&mut self) {
        let light = Module::Func(Color::Light);
        for i in 0..8 {
            self.set(i, 7, light);
            self.set(7, i, light);
            self.set(i, -8, light);
            self.set(7, -8 + i, light);
            self.set(-8 + i, 7, light);
            self.set(-8, i, light);
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        self.draw_line(6, 8, 6, w - 9);
        self.draw_line(8, 6, w - 9, 6);
    }

    // Alternating line, dark on even indices. Modules already set are kept.
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        let coords: Vec<(i16, i16)> = if r1 == r2 {
            (c1..=c2).map(|j| (r1, j)).collect()
        } else {
            (r1..=r2).map(|i| (i, c1)).collect()
        };
        for (r, c) in coords {
            if !matches!(self.get(r, c), Module::Empty) {
                continue;
            }
            let idx = if r1 == r2 { c } else { r };
            self.set(r, c, Module::Func(Color::from(idx & 1 == 0)));
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.version().alignment_pattern();
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r, c)
            }
        }
    }

    // Centres inside a finder corner are skipped
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        if (r == 6 && (c == 6 || c - w == -7)) || (r - w == -7 && c == 6) {
            return;
        }
        self.draw_square_at(r, c, 2);
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    fn draw_dark_module(&mut self) {
        self.set(-8, 8, Module::Func(Color::Dark));
    }

    // Light placeholders, overwritten once the mask is known
    fn reserve_format_area(&mut self) {
        self.draw_format_info(0);
    }

    fn draw_format_info(&mut self, format_info: u16) {
        self.draw_number(
            format_info as u32,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_MAIN,
        );
        self.draw_number(
            format_info as u32,
            FORMAT_INFO_BIT_LEN,
            Module::Format(Color::Light),
            Module::Format(Color::Dark),
            &FORMAT_INFO_COORDS_QR_SIDE,
        );
    }

    // Bit i (LSB first) goes to row i / 3 of the top right block and to
    // column i / 3 of the bottom left block
    fn draw_version_info(&mut self) {
        if *self.version() < 7 {
            return;
        }
        let ver_info = self.version().info();
        for i in 0..VERSION_INFO_BIT_LEN {
            let clr = Color::from((ver_info >> i) & 1 == 1);
            let a = (i % 3) as i16 - 11;
            let b = (i / 3) as i16;
            self.set(b, a, Module::Version(clr));
            self.set(a, b, Module::Version(clr));
        }
    }

    // MSB first
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        let mut mask = 1 << (bit_len - 1);
        for (r, c) in coords {
            if number & mask == 0 {
                self.set(*r, *c, off_clr);
            } else {
                self.set(*r, *c, on_clr);
            }
            mask >>= 1;
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_timing_pattern();
        self.draw_dark_module();
        self.reserve_format_area();
        self.draw_version_info();
    }
}

#[cfg(test)]
mod all_function_patterns_test {
    use super::qr_util_tests::blank_qr;
    use crate::builder::Module;
    use crate::common::metadata::Version;

    #[test]
    fn test_all_function_patterns_1() {
        let mut qr = blank_qr(1);
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM....Ffffffff\n\
             fFFFFFfFM....FfFFFFFf\n\
             fFfffFfFM....FfFfffFf\n\
             fFfffFfFM....FfFfffFf\n\
             fFfffFfFM....FfFfffFf\n\
             fFFFFFfFM....FfFFFFFf\n\
             fffffffFfFfFfFfffffff\n\
             FFFFFFFFM....FFFFFFFF\n\
             MMMMMMfMM....MMMMMMMM\n\
             ......F..............\n\
             ......f..............\n\
             ......F..............\n\
             ......f..............\n\
             FFFFFFFFf............\n\
             fffffffFM............\n\
             fFFFFFfFM............\n\
             fFfffFfFM............\n\
             fFfffFfFM............\n\
             fFfffFfFM............\n\
             fFFFFFfFM............\n\
             fffffffFM............\n"
        );
    }

    #[test]
    fn test_all_function_patterns_3() {
        let mut qr = blank_qr(3);
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM............Ffffffff\n\
             fFFFFFfFM............FfFFFFFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFfffFfFM............FfFfffFf\n\
             fFFFFFfFM............FfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFM............FFFFFFFF\n\
             MMMMMMfMM............MMMMMMMM\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f......................\n\
             ......F......................\n\
             ......f.............fffff....\n\
             FFFFFFFFf...........fFFFf....\n\
             fffffffFM...........fFfFf....\n\
             fFFFFFfFM...........fFFFf....\n\
             fFfffFfFM...........fffff....\n\
             fFfffFfFM....................\n\
             fFfffFfFM....................\n\
             fFFFFFfFM....................\n\
             fffffffFM....................\n"
        );
    }

    #[test]
    fn test_all_function_patterns_7() {
        let mut qr = blank_qr(7);
        qr.draw_all_function_patterns();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFM.........................VVvFfffffff\n\
             fFFFFFfFM.........................VvVFfFFFFFf\n\
             fFfffFfFM.........................VvVFfFfffFf\n\
             fFfffFfFM.........................VvvFfFfffFf\n\
             fFfffFfFM...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFM...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFM...........fFFFf............FFFFFFFF\n\
             MMMMMMfMM...........fffff............MMMMMMMM\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFf...........fFFFf...........fFFFf....\n\
             fffffffFM...........fFfFf...........fFfFf....\n\
             fFFFFFfFM...........fFFFf...........fFFFf....\n\
             fFfffFfFM...........fffff...........fffff....\n\
             fFfffFfFM....................................\n\
             fFfffFfFM....................................\n\
             fFFFFFfFM....................................\n\
             fffffffFM....................................\n"
        );
    }

    #[test]
    fn test_empty_modules_fit_codewords() {
        for ver in Version::all() {
            let mut qr = blank_qr(*ver);
            qr.draw_all_function_patterns();
            let empty = qr.grid().iter().filter(|m| **m == Module::Empty).count();
            assert_eq!(empty, ver.total_codewords() * 8 + ver.remainder_bits(), "Version {ver}");
        }
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    // Fills every empty module on the zigzag path, leaving the tail unallocated.
    // A partial payload leaves everything past its end unallocated.
    pub fn draw_encoding_region(&mut self, mut payload: BitStream) {
        let is_full = payload.len() == self.spec.total_codewords() << 3;
        let mut unallocated = 0;
        for (r, c) in EncRegionIter::new(self.version()) {
            if !matches!(self.get(r, c), Module::Empty) {
                continue;
            }
            let module = match payload.next() {
                Some(bit) => Module::Data(Color::from(bit)),
                None => {
                    unallocated += 1;
                    Module::Unallocated
                }
            };
            self.set(r, c, module);
        }

        debug_assert!(payload.next().is_none(), "Payload doesn't fit the encoding region");
        debug_assert!(
            !is_full || unallocated == self.version().remainder_bits(),
            "Unallocated modules {unallocated}, expected remainder bits {}",
            self.version().remainder_bits()
        );
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
    }

    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.spec.mask = Some(pattern);
        let format_info = format_info(self.ec_level(), pattern.index());
        self.draw_format_info(format_info);

        let w = self.w;
        for r in 0..w {
            for c in 0..w {
                if !pattern.applies(r, c) {
                    continue;
                }
                if let Module::Data(clr) = self.get(r as i16, c as i16) {
                    self.set(r as i16, c as i16, Module::Data(!clr))
                }
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

// Bit 14 first
static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
