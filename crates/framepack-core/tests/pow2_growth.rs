use framepack_core::prelude::*;
use image::{Rgba, RgbaImage};

#[test]
fn grown_canvas_rounds_to_power_of_two() {
    let mut builder = AtlasBuilder::new();
    for side in [64u32, 32, 16] {
        builder.add(
            format!("sq{side}"),
            RgbaImage::from_pixel(side, side, Rgba([255, 255, 255, 255])),
        );
    }

    let cfg = PackConfig::builder().padding(1).allow_rotate(false).build();
    let out = builder.pack(&cfg).expect("pack");
    let atlas = &out.atlas;

    assert!(atlas.width.is_power_of_two() && atlas.height.is_power_of_two());
    assert_eq!((atlas.width, atlas.height), (256, 128));

    let frame_of = |name: &str| {
        atlas
            .placed()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p.frame)
            .expect("placed")
    };
    assert_eq!(frame_of("sq64"), Rect::new(0, 0, 64, 64));
    assert_eq!(frame_of("sq32"), Rect::new(65, 0, 32, 32));
    assert_eq!(frame_of("sq16"), Rect::new(98, 0, 16, 16));
}

#[test]
fn single_sprite_auto_canvas_is_seeded_from_its_cell() {
    let mut builder = AtlasBuilder::new();
    builder.add("lone", RgbaImage::from_pixel(30, 12, Rgba([0, 0, 0, 255])));

    let cfg = PackConfig::builder().padding(1).pow2(false).build();
    let out = builder.pack(&cfg).expect("pack");

    // Seed canvas is the padded cell; no growth needed for one entry.
    assert_eq!((out.atlas.width, out.atlas.height), (31, 13));
    let (_, p) = out.atlas.placed().next().expect("placed");
    assert_eq!(p.frame, Rect::new(0, 0, 30, 12));
}
