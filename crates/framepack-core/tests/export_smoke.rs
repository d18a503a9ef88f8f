use framepack_core::prelude::*;
use image::{Rgba, RgbaImage};

#[test]
fn json_metadata_matches_texturepacker_shape() {
    let mut builder = AtlasBuilder::new();
    builder.add("b_second", RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])));
    builder.add("a_first", RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255])));
    builder.add("too_big", RgbaImage::from_pixel(40, 40, Rgba([0, 255, 0, 255])));

    let cfg = PackConfig::builder()
        .fixed_size(16, 16)
        .padding(0)
        .pow2(false)
        .build();
    let out = builder.pack(&cfg).expect("pack");
    let doc = to_json(&out.atlas, "atlas.png");

    assert_eq!(doc["meta"]["image"], "atlas.png");
    assert_eq!(doc["meta"]["size"]["w"], 16);
    assert_eq!(doc["meta"]["size"]["h"], 16);

    // Frames keep registration order, not packing order.
    let frames = doc["frames"].as_object().expect("frames object");
    let keys: Vec<_> = frames.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b_second", "a_first"]);

    let first = &frames["a_first"];
    assert_eq!(first["frame"]["x"], 0);
    assert_eq!(first["frame"]["y"], 0);
    assert_eq!(first["frame"]["w"], 8);
    assert_eq!(first["frame"]["h"], 8);
    assert_eq!(first["rotated"], false);
    assert_eq!(first["trimmed"], false);
    assert_eq!(first["spriteSourceSize"]["x"], 0);
    assert_eq!(first["spriteSourceSize"]["w"], 8);
    assert_eq!(first["sourceSize"]["w"], 8);
    assert_eq!(first["sourceSize"]["h"], 8);
    assert_eq!(frames["b_second"]["frame"]["x"], 8);

    // Failed entries carry a reason and no coordinates.
    let failed = doc["failed"].as_object().expect("failed object");
    assert_eq!(failed["too_big"]["reason"], "does_not_fit");
    assert!(failed["too_big"].get("frame").is_none());
}
