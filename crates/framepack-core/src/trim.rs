use crate::model::Rect;
use crate::surface::Surface;

/// Computes the tightest rect containing every pixel with non-zero alpha.
///
/// Scans each edge inward until an opaque pixel is found. A fully
/// transparent surface collapses to a 1x1 rect at the origin so the entry
/// still occupies a slot in the atlas.
pub fn trim_rect(surface: &impl Surface) -> Rect {
    let w = surface.width();
    let h = surface.height();

    // left
    let mut x1 = 0;
    while x1 < w && (0..h).all(|y| surface.is_transparent(x1, y)) {
        x1 += 1;
    }
    if x1 >= w {
        return Rect::new(0, 0, 1, 1);
    }

    // right
    let mut x2 = w - 1;
    while x2 > x1 && (0..h).all(|y| surface.is_transparent(x2, y)) {
        x2 -= 1;
    }

    // top
    let mut y1 = 0;
    while y1 < h && (x1..=x2).all(|x| surface.is_transparent(x, y1)) {
        y1 += 1;
    }

    // bottom
    let mut y2 = h - 1;
    while y2 > y1 && (x1..=x2).all(|x| surface.is_transparent(x, y2)) {
        y2 -= 1;
    }

    Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1)
}
