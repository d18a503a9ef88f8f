//! Core library for packing sprites into a texture atlas.
//!
//! - Placement: best-area-fit over a free-region list with full-extent remainders, optional 90 degree rotation
//! - Canvas: fixed size or grown on demand, optionally rounded up to powers of two
//! - Pipeline: `AtlasBuilder` takes named surfaces and returns a composited image plus per-entry metadata
//! - Data model is serde-serializable; a TexturePacker-style JSON exporter is provided.
//!
//! Quick example:
//! ```ignore
//! use framepack_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let hero = image::open("hero.png")?.to_rgba8();
//! let coin = image::open("coin.png")?.to_rgba8();
//! let mut builder = AtlasBuilder::new();
//! builder.add("hero.png", hero);
//! builder.add("coin.png", coin);
//! let out = builder.pack(&PackConfig::default())?;
//! out.image.save("atlas.png")?;
//! let meta = serde_json::to_string_pretty(&to_json(&out.atlas, "atlas.png"))?;
//! # Ok(()) }
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod surface;
pub mod trim;

pub use compositor::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use surface::*;
pub use trim::*;

/// Convenience prelude for common types and functions.
/// Importing `framepack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackConfig, PackConfigBuilder, RankFn, SortKey};
    pub use crate::export::to_json;
    pub use crate::model::{
        AtlasEntry, AtlasResult, FailReason, PackStats, Placement, PlacementResult, Rect,
    };
    pub use crate::pipeline::{AtlasBuilder, PackOutput};
    pub use crate::surface::Surface;
}
