use framepack_core::prelude::*;
use image::{Rgba, RgbaImage};

fn gradient_with_border(w: u32, h: u32, border: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w + 2 * border, h + 2 * border);
    for y in 0..h {
        for x in 0..w {
            img.put_pixel(
                border + x,
                border + y,
                Rgba([x as u8, y as u8, (x + y) as u8, 255]),
            );
        }
    }
    img
}

#[test]
fn unrotated_pixels_land_at_frame_origin() {
    let src = gradient_with_border(9, 5, 2);
    let mut builder = AtlasBuilder::new();
    builder.add("grad", src.clone());

    let cfg = PackConfig::builder()
        .padding(3)
        .allow_rotate(false)
        .pow2(false)
        .build();
    let out = builder.pack(&cfg).expect("pack");

    let (_, p) = out.atlas.placed().next().expect("placed");
    assert!(!p.rotated);
    assert_eq!(p.source, Rect::new(2, 2, 9, 5));

    for yy in 0..p.source.h {
        for xx in 0..p.source.w {
            let got = out.image.get_pixel(p.frame.x + xx, p.frame.y + yy);
            let want = src.get_pixel(p.source.x + xx, p.source.y + yy);
            assert_eq!(got, want, "pixel ({xx}, {yy})");
        }
    }
}

#[test]
fn rotated_pixels_follow_the_ccw_mapping() {
    let src = gradient_with_border(9, 5, 1);
    let mut builder = AtlasBuilder::new();
    builder.add("grad", src.clone());

    // Only the rotated orientation fits the fixed canvas.
    let cfg = PackConfig::builder()
        .padding(0)
        .fixed_size(5, 9)
        .pow2(false)
        .build();
    let out = builder.pack(&cfg).expect("pack");

    let (_, p) = out.atlas.placed().next().expect("placed");
    assert!(p.rotated);
    assert_eq!((p.frame.w, p.frame.h), (5, 9));

    let (sw, sh) = (p.source.w, p.source.h);
    for yy in 0..sw {
        for xx in 0..sh {
            let got = out.image.get_pixel(p.frame.x + xx, p.frame.y + yy);
            let want = src.get_pixel(p.source.x + (sw - 1 - yy), p.source.y + xx);
            assert_eq!(got, want, "pixel ({xx}, {yy})");
        }
    }
}

#[test]
fn background_stays_fully_transparent() {
    let mut builder = AtlasBuilder::new();
    builder.add("solid", RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255])));
    let cfg = PackConfig::builder().padding(2).build();
    let out = builder.pack(&cfg).expect("pack");

    let (_, p) = out.atlas.placed().next().expect("placed");
    for y in 0..out.image.height() {
        for x in 0..out.image.width() {
            let inside = x >= p.frame.x
                && x < p.frame.x + p.frame.w
                && y >= p.frame.y
                && y < p.frame.y + p.frame.h;
            if !inside {
                assert_eq!(out.image.get_pixel(x, y).0[3], 0, "({x}, {y})");
            }
        }
    }
}
