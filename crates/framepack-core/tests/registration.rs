use framepack_core::prelude::*;
use image::{Rgba, RgbaImage};

#[test]
fn re_adding_a_name_replaces_the_surface_in_place() {
    let mut builder = AtlasBuilder::new();
    builder.add("icon", RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255])));
    builder.add("backdrop", RgbaImage::from_pixel(16, 16, Rgba([0, 255, 0, 255])));
    builder.add("icon", RgbaImage::from_pixel(24, 24, Rgba([0, 0, 255, 255])));
    assert_eq!(builder.len(), 2);

    let cfg = PackConfig::builder()
        .padding(0)
        .alpha_trim(false)
        .allow_rotate(false)
        .pow2(false)
        .build();
    let out = builder.pack(&cfg).expect("pack");
    let atlas = &out.atlas;

    // The replacement surface is packed, in the original metadata slot.
    assert_eq!(atlas.entries.len(), 2);
    assert_eq!(atlas.entries[0].name, "icon");
    assert_eq!(atlas.entries[1].name, "backdrop");
    let icon = atlas.entries[0].result.placement().expect("placed");
    assert_eq!((icon.frame.w, icon.frame.h), (24, 24));
    assert_eq!(icon.source_size, (24, 24));

    let doc = to_json(atlas, "atlas.png");
    let keys: Vec<_> = doc["frames"]
        .as_object()
        .expect("frames object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["icon", "backdrop"]);
}
