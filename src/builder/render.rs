use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};

use super::{Module, QR};
use crate::common::{error::QRResult, metadata::Color};

pub const DEFAULT_MODULE_SIZE: u32 = 10;
pub const DEFAULT_QUIET_ZONE: u32 = 4;

// Render
//------------------------------------------------------------------------------

impl QR {
    // Dark modules are black, everything else white, inside a white quiet zone
    pub fn render(&self, module_sz: u32, quiet_zone: u32) -> GrayImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let qz_sz = quiet_zone * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                return Luma([255]);
            }
            let r = ((y - qz_sz) / module_sz) as i16;
            let c = ((x - qz_sz) / module_sz) as i16;
            Luma([self.get(r, c).select(0, 255)])
        })
    }

    // Same layout as `render`, but modules not holding message bits are red
    pub fn render_debug(&self, module_sz: u32, quiet_zone: u32) -> RgbImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let qz_sz = quiet_zone * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        RgbImage::from_fn(total_sz, total_sz, |x, y| {
            if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                return Rgb([255, 255, 255]);
            }
            let r = ((y - qz_sz) / module_sz) as i16;
            let c = ((x - qz_sz) / module_sz) as i16;
            match self.get(r, c) {
                Module::Unallocated | Module::Empty => Rgb([255, 0, 0]),
                m => m.select(Rgb([0, 0, 0]), Rgb([255, 255, 255])),
            }
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, module_sz: u32, quiet_zone: u32) -> QRResult<()> {
        self.render(module_sz, quiet_zone).save(path)?;
        Ok(())
    }

    // Two characters per module so the symbol keeps its aspect ratio in a terminal
    pub fn to_str(&self, quiet_zone: usize) -> String {
        let w = self.width();
        let total_sz = quiet_zone + w + quiet_zone;

        let mut canvas = String::with_capacity(total_sz * (total_sz * 2 + 1));
        for i in 0..total_sz {
            for j in 0..total_sz {
                let inside = (quiet_zone..quiet_zone + w).contains(&i)
                    && (quiet_zone..quiet_zone + w).contains(&j);
                let clr = if inside {
                    *self.get((i - quiet_zone) as i16, (j - quiet_zone) as i16)
                } else {
                    Color::Light
                };
                // Light modules are drawn as filled blocks on a dark terminal
                canvas.push_str(clr.select("  ", "██"));
            }
            canvas.push('\n');
        }

        canvas
    }
}
