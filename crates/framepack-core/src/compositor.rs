use crate::surface::Surface;

/// Copies the `sw x sh` source region at `(sx, sy)` onto `dst` at
/// `(dx, dy)`, optionally rotated 90 degrees counter-clockwise.
///
/// A rotated blit writes a `sh x sw` region: destination `(xx, yy)` reads
/// source `(sx + (sw - 1 - yy), sy + xx)`, so the source's top edge becomes
/// the destination's left edge. Pixels landing outside `dst` are clipped.
#[allow(clippy::too_many_arguments)]
pub fn blit(
    src: &impl Surface,
    dst: &mut impl Surface,
    dx: u32,
    dy: u32,
    sx: u32,
    sy: u32,
    sw: u32,
    sh: u32,
    rotated: bool,
) {
    if !rotated {
        dst.copy_region(src, sx, sy, sw, sh, dx, dy);
        return;
    }
    let dw = dst.width();
    let dh = dst.height();
    for yy in 0..sw {
        for xx in 0..sh {
            if dx + xx < dw && dy + yy < dh {
                let px = src.get_pixel(sx + (sw - 1 - yy), sy + xx);
                dst.put_pixel(dx + xx, dy + yy, px);
            }
        }
    }
}
