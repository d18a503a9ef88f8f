use image::{Rgba, RgbaImage};

/// Pixel-addressable RGBA surface.
///
/// The pipeline reads sources and writes the output canvas through this
/// trait, so callers can pack into their own buffer types. Coordinates are
/// top-left origin; out-of-bounds accesses in the provided methods are
/// clipped, never panicking.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8>;
    fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>);

    /// Reinitialize to `w x h`, all pixels fully transparent.
    fn resize(&mut self, w: u32, h: u32);

    /// True when the pixel's alpha channel is zero.
    fn is_transparent(&self, x: u32, y: u32) -> bool {
        self.get_pixel(x, y).0[3] == 0
    }

    /// Copy a `w x h` region from `src` at `(sx, sy)` to `(dx, dy)` in self.
    /// Pixels falling outside either surface are skipped.
    fn copy_region(&mut self, src: &impl Surface, sx: u32, sy: u32, w: u32, h: u32, dx: u32, dy: u32)
    where
        Self: Sized,
    {
        let cw = w.min(src.width().saturating_sub(sx));
        let ch = h.min(src.height().saturating_sub(sy));
        for yy in 0..ch {
            for xx in 0..cw {
                if dx + xx < self.width() && dy + yy < self.height() {
                    self.put_pixel(dx + xx, dy + yy, src.get_pixel(sx + xx, sy + yy));
                }
            }
        }
    }

    /// Copy a region within the same surface. Safe for overlapping source
    /// and destination: the source pixels are staged before writing.
    fn copy_region_within(&mut self, sx: u32, sy: u32, w: u32, h: u32, dx: u32, dy: u32) {
        let cw = w.min(self.width().saturating_sub(sx));
        let ch = h.min(self.height().saturating_sub(sy));
        let mut staged = Vec::with_capacity((cw * ch) as usize);
        for yy in 0..ch {
            for xx in 0..cw {
                staged.push(self.get_pixel(sx + xx, sy + yy));
            }
        }
        for yy in 0..ch {
            for xx in 0..cw {
                if dx + xx < self.width() && dy + yy < self.height() {
                    self.put_pixel(dx + xx, dy + yy, staged[(yy * cw + xx) as usize]);
                }
            }
        }
    }
}

impl Surface for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }
    fn height(&self) -> u32 {
        self.dimensions().1
    }
    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *RgbaImage::get_pixel(self, x, y)
    }
    fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        RgbaImage::put_pixel(self, x, y, pixel);
    }
    fn resize(&mut self, w: u32, h: u32) {
        *self = RgbaImage::new(w, h);
    }
}
