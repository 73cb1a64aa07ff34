//! CPU raster target.
//!
//! Pixels are straight (non-premultiplied) RGBA8 in row-major order, which is
//! the layout `ImageData` expects, so the browser can blit `as_bytes()`
//! without conversion.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::render::DrawSurface;

/// One pixel: 4 bytes, matches canvas `ImageData`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    fn to_unit(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    fn from_unit(c: [f32; 4]) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8 {
            r: q(c[0]),
            g: q(c[1]),
            b: q(c[2]),
            a: q(c[3]),
        }
    }
}

/// Software surface scaled from CSS pixels by a device pixel ratio.
pub struct SoftwareRaster {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<Rgba8>,
}

impl SoftwareRaster {
    /// `width`/`height` are physical pixels; `scale` maps CSS pixels onto them.
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        let mut raster = Self {
            width: 0,
            height: 0,
            scale: 1.0,
            pixels: Vec::new(),
        };
        raster.resize(width, height, scale);
        raster
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Source-over blend of a straight-alpha colour onto one pixel.
    fn blend(&mut self, index: usize, color: [f32; 4], coverage: f32) {
        let Some(dst) = self.pixels.get_mut(index) else {
            return;
        };
        let src_a = color[3] * coverage;
        if src_a <= 0.0 {
            return;
        }
        let d = dst.to_unit();
        let out_a = src_a + d[3] * (1.0 - src_a);
        if out_a <= 0.0 {
            *dst = Rgba8::TRANSPARENT;
            return;
        }
        let mix = |s: f32, dc: f32| (s * src_a + dc * d[3] * (1.0 - src_a)) / out_a;
        *dst = Rgba8::from_unit([
            mix(color[0], d[0]),
            mix(color[1], d[1]),
            mix(color[2], d[2]),
            out_a,
        ]);
    }
}

impl DrawSurface for SoftwareRaster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32, scale: f32) {
        self.set_scale(scale);
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba8::TRANSPARENT; width as usize * height as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }

    /// Anti-aliased disc; `center` and `radius` are in CSS pixels.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 || color[3] <= 0.0 {
            return;
        }
        let c = center * self.scale;
        let r = radius * self.scale;

        let x0 = (c.x - r - 1.0).floor().max(0.0) as i64;
        let y0 = (c.y - r - 1.0).floor().max(0.0) as i64;
        let x1 = ((c.x + r + 1.0).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((c.y + r + 1.0).ceil() as i64).min(self.height as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(c);
                // One-pixel ramp at the rim.
                let coverage = (r + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let index = y as usize * self.width as usize + x as usize;
                    self.blend(index, color, coverage);
                }
            }
        }
    }
}
