use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::packer::MAX_CANVAS_DIM;

/// Ranking function deciding packing order: maps a packable `(w, h)` to a
/// rank; entries are placed largest-rank first.
pub type RankFn = fn(u32, u32) -> u64;

/// Built-in orderings for deterministic packing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Descending by `w * h` (default; least fragmentation for best-area-fit).
    AreaDesc,
    /// Descending by the longer side.
    MaxSideDesc,
    /// Descending by `w + h`.
    PerimeterDesc,
}

impl SortKey {
    /// The ranking function this key selects.
    pub fn rank_fn(&self) -> RankFn {
        match self {
            SortKey::AreaDesc => |w, h| (w as u64) * (h as u64),
            SortKey::MaxSideDesc => |w, h| w.max(h) as u64,
            SortKey::PerimeterDesc => |w, h| (w as u64) + (h as u64),
        }
    }
}

impl FromStr for SortKey {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area" | "area_desc" => Ok(Self::AreaDesc),
            "max-side" | "max_side" | "max_side_desc" => Ok(Self::MaxSideDesc),
            "perimeter" | "perimeter_desc" => Ok(Self::PerimeterDesc),
            _ => Err(()),
        }
    }
}

/// Packing configuration.
///
/// Defaults match the CLI defaults: 1 px padding, rotation allowed,
/// power-of-two canvas, alpha trim on, auto-grown canvas size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Gap reserved to the right of and below every placed frame.
    pub padding: u32,
    /// Fixed canvas dimensions. `None` grows the canvas as needed.
    #[serde(default)]
    pub fixed_size: Option<(u32, u32)>,
    /// Allow 90° rotations for placements where beneficial.
    pub allow_rotate: bool,
    /// Round final canvas dimensions up to powers of two.
    pub power_of_two: bool,
    /// Trim fully transparent borders before packing.
    pub alpha_trim: bool,
    /// Ordering applied before placement.
    #[serde(default = "default_sort")]
    pub sort: SortKey,
    /// Custom ranking; overrides `sort` when set. Not serialized.
    #[serde(skip)]
    pub rank_override: Option<RankFn>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            padding: 1,
            fixed_size: None,
            allow_rotate: true,
            power_of_two: true,
            alpha_trim: true,
            sort: default_sort(),
            rank_override: None,
        }
    }
}

impl PackConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if a fixed canvas has a zero dimension or exceeds
    /// the per-dimension canvas limit, or if the padding alone exhausts the
    /// largest allowed canvas.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PackError;

        if let Some((w, h)) = self.fixed_size {
            if w == 0 || h == 0 {
                return Err(PackError::InvalidConfig(format!(
                    "fixed canvas must have non-zero dimensions, got {}x{}",
                    w, h
                )));
            }
            if w > MAX_CANVAS_DIM || h > MAX_CANVAS_DIM {
                return Err(PackError::InvalidConfig(format!(
                    "fixed canvas {}x{} exceeds the {} px per-dimension limit",
                    w, h, MAX_CANVAS_DIM
                )));
            }
        }
        if self.padding >= MAX_CANVAS_DIM {
            return Err(PackError::InvalidConfig(format!(
                "padding {} leaves no room for content (limit {} px per dimension)",
                self.padding, MAX_CANVAS_DIM
            )));
        }
        Ok(())
    }

    /// Active ranking function: `rank_override` if set, else `sort`.
    pub fn rank_fn(&self) -> RankFn {
        self.rank_override.unwrap_or_else(|| self.sort.rank_fn())
    }

    /// Create a fluent builder for `PackConfig`.
    pub fn builder() -> PackConfigBuilder {
        PackConfigBuilder::new()
    }
}

fn default_sort() -> SortKey {
    SortKey::AreaDesc
}

/// Builder for `PackConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackConfigBuilder {
    cfg: PackConfig,
}

impl PackConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackConfig::default(),
        }
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    /// Fix the canvas to `w x h`; oversized entries fail instead of growing it.
    pub fn fixed_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.fixed_size = Some((w, h));
        self
    }
    /// Let the canvas grow as needed (the default).
    pub fn auto_size(mut self) -> Self {
        self.cfg.fixed_size = None;
        self
    }
    pub fn allow_rotate(mut self, v: bool) -> Self {
        self.cfg.allow_rotate = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.power_of_two = v;
        self
    }
    pub fn alpha_trim(mut self, v: bool) -> Self {
        self.cfg.alpha_trim = v;
        self
    }
    pub fn sort(mut self, v: SortKey) -> Self {
        self.cfg.sort = v;
        self
    }
    pub fn rank_override(mut self, f: RankFn) -> Self {
        self.cfg.rank_override = Some(f);
        self
    }
    pub fn build(self) -> PackConfig {
        self.cfg
    }
}
