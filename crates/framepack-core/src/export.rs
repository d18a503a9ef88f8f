use serde_json::{Map, Value, json};

use crate::model::{AtlasResult, PlacementResult};

/// Renders atlas metadata in the TexturePacker JSON-hash shape.
///
/// `frames` keys appear in registration order. Entries that could not be
/// placed are listed under `failed` with a reason and no coordinates.
/// `image_name` becomes `meta.image`.
pub fn to_json(result: &AtlasResult, image_name: &str) -> Value {
    let mut frames = Map::new();
    let mut failed = Map::new();
    for entry in &result.entries {
        match &entry.result {
            PlacementResult::Placed(p) => {
                frames.insert(
                    entry.name.clone(),
                    json!({
                        "frame": { "x": p.frame.x, "y": p.frame.y, "w": p.frame.w, "h": p.frame.h },
                        "rotated": p.rotated,
                        "trimmed": p.trimmed,
                        "spriteSourceSize": {
                            "x": p.source.x, "y": p.source.y, "w": p.source.w, "h": p.source.h
                        },
                        "sourceSize": { "w": p.source_size.0, "h": p.source_size.1 },
                    }),
                );
            }
            PlacementResult::Failed(reason) => {
                failed.insert(entry.name.clone(), json!({ "reason": reason.as_str() }));
            }
        }
    }
    json!({
        "meta": {
            "image": image_name,
            "size": { "w": result.width, "h": result.height },
        },
        "frames": frames,
        "failed": failed,
    })
}
