use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

/// Why an entry could not be placed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    /// No free region of the fixed canvas admits the entry at either orientation.
    DoesNotFit,
    /// Auto-grow reached the per-dimension canvas limit.
    CanvasLimitExceeded,
}

impl FailReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailReason::DoesNotFit => "does_not_fit",
            FailReason::CanvasLimitExceeded => "canvas_limit_exceeded",
        }
    }
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully placed entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Placed rectangle within the canvas (post-rotation width/height).
    pub frame: Rect,
    /// True if the entry was rotated 90° when placed.
    pub rotated: bool,
    /// True if trimming cropped the source.
    pub trimmed: bool,
    /// Content sub-rect within the original image after trimming.
    pub source: Rect,
    /// Original (untrimmed) image size.
    pub source_size: (u32, u32),
}

/// Outcome of packing one entry. Failed entries carry a reason and nothing
/// else; there is no position to read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementResult {
    Placed(Placement),
    Failed(FailReason),
}

impl PlacementResult {
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            PlacementResult::Placed(p) => Some(p),
            PlacementResult::Failed(_) => None,
        }
    }
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed(_))
    }
}

/// One registered source and its packing outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasEntry {
    pub name: String,
    pub result: PlacementResult,
}

/// Result of a pack run: final canvas dimensions plus one entry per
/// registered source, in registration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasResult {
    pub width: u32,
    pub height: u32,
    pub entries: Vec<AtlasEntry>,
}

impl AtlasResult {
    /// Placed entries as `(name, placement)` pairs, in registration order.
    pub fn placed(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.placement().map(|p| (e.name.as_str(), p)))
    }

    /// Failed entries as `(name, reason)` pairs, in registration order.
    pub fn failed(&self) -> impl Iterator<Item = (&str, FailReason)> {
        self.entries.iter().filter_map(|e| match e.result {
            PlacementResult::Failed(reason) => Some((e.name.as_str(), reason)),
            PlacementResult::Placed(_) => None,
        })
    }

    /// Computes packing statistics for this result.
    pub fn stats(&self) -> PackStats {
        let mut num_placed = 0;
        let mut num_failed = 0;
        let mut num_rotated = 0;
        let mut num_trimmed = 0;
        let mut used_area = 0u64;

        for entry in &self.entries {
            match &entry.result {
                PlacementResult::Placed(p) => {
                    num_placed += 1;
                    used_area += p.frame.area();
                    if p.rotated {
                        num_rotated += 1;
                    }
                    if p.trimmed {
                        num_trimmed += 1;
                    }
                }
                PlacementResult::Failed(_) => num_failed += 1,
            }
        }

        let canvas_area = (self.width as u64) * (self.height as u64);
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };

        PackStats {
            num_entries: self.entries.len(),
            num_placed,
            num_failed,
            num_rotated,
            num_trimmed,
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Total number of registered entries.
    pub num_entries: usize,
    /// Entries that received a placement.
    pub num_placed: usize,
    /// Entries that could not be placed.
    pub num_failed: usize,
    /// Number of rotated placements.
    pub num_rotated: usize,
    /// Number of trimmed placements.
    pub num_trimmed: usize,
    /// Canvas area in pixels (width * height).
    pub canvas_area: u64,
    /// Area covered by placed frames.
    pub used_area: u64,
    /// used_area / canvas_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}/{}, Failed: {}, Rotated: {}, Trimmed: {}, Canvas Area: {} px², Used Area: {} px², Occupancy: {:.2}%",
            self.num_placed,
            self.num_entries,
            self.num_failed,
            self.num_rotated,
            self.num_trimmed,
            self.canvas_area,
            self.used_area,
            self.occupancy * 100.0,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }
}
