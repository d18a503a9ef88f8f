use std::time::Instant;

use image::RgbaImage;
use tracing::{debug, instrument};

use crate::compositor::blit;
use crate::config::PackConfig;
use crate::error::{PackError, Result};
use crate::model::{
    AtlasEntry, AtlasResult, FailReason, PackStats, Placement, PlacementResult, Rect,
};
use crate::packer::BestFitPacker;
use crate::surface::Surface;
use crate::trim::trim_rect;

/// Per-source data computed before placement.
struct Prep {
    source: Rect,
    size: (u32, u32),
    trimmed: bool,
    cell: (u32, u32),
}

/// Collects named sources and packs them into an atlas.
///
/// Sources keep their registration order in the produced metadata; packing
/// order is decided separately by the configured ranking.
#[derive(Debug)]
pub struct AtlasBuilder<S> {
    sources: Vec<(String, S)>,
}

impl<S> Default for AtlasBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AtlasBuilder<S> {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Registers a named source. Re-registering a name replaces the
    /// surface and keeps the original position in the metadata order.
    pub fn add(&mut self, name: impl Into<String>, surface: S) -> &mut Self {
        let name = name.into();
        if let Some(slot) = self.sources.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = surface;
        } else {
            self.sources.push((name, surface));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<S: Surface> AtlasBuilder<S> {
    /// Packs every registered source into `dest`.
    ///
    /// `dest` is resized to the final canvas dimensions with a fully
    /// transparent background before compositing. Entries that cannot be
    /// placed are reported in the result, not as errors.
    #[instrument(skip_all)]
    pub fn pack_into<D: Surface>(&self, dest: &mut D, cfg: &PackConfig) -> Result<AtlasResult> {
        cfg.validate()?;
        if self.sources.is_empty() {
            return Err(PackError::Empty);
        }
        let start = Instant::now();

        let mut prepared = Vec::with_capacity(self.sources.len());
        for (name, surface) in &self.sources {
            if surface.width() == 0 || surface.height() == 0 {
                return Err(PackError::EmptySource(name.clone()));
            }
            let source = if cfg.alpha_trim {
                trim_rect(surface)
            } else {
                Rect::new(0, 0, surface.width(), surface.height())
            };
            let trimmed = source.w != surface.width() || source.h != surface.height();
            prepared.push(Prep {
                source,
                size: (surface.width(), surface.height()),
                trimmed,
                cell: (
                    source.w.saturating_add(cfg.padding),
                    source.h.saturating_add(cfg.padding),
                ),
            });
        }

        // Stable sort keeps registration order for equal ranks.
        let rank = cfg.rank_fn();
        let mut order: Vec<usize> = (0..prepared.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(rank(prepared[i].source.w, prepared[i].source.h)));

        let mut packer = BestFitPacker::new(cfg, prepared[order[0]].cell);
        let mut results = vec![PlacementResult::Failed(FailReason::DoesNotFit); prepared.len()];
        for &i in &order {
            let prep = &prepared[i];
            match packer.insert(prep.cell.0, prep.cell.1) {
                Ok((cell, rotated)) => {
                    let (fw, fh) = if rotated {
                        (prep.source.h, prep.source.w)
                    } else {
                        (prep.source.w, prep.source.h)
                    };
                    results[i] = PlacementResult::Placed(Placement {
                        frame: Rect::new(cell.x, cell.y, fw, fh),
                        rotated,
                        trimmed: prep.trimmed,
                        source: prep.source,
                        source_size: prep.size,
                    });
                }
                Err(reason) => {
                    let name = self.sources[i].0.as_str();
                    debug!(name, %reason, "entry not placed");
                    results[i] = PlacementResult::Failed(reason);
                }
            }
        }

        let (mut out_w, mut out_h) = match cfg.fixed_size {
            Some((w, h)) => (w, h),
            None => (packer.width(), packer.height()),
        };
        if cfg.power_of_two {
            out_w = out_w.max(1).next_power_of_two();
            out_h = out_h.max(1).next_power_of_two();
        }
        dest.resize(out_w, out_h);

        for (i, result) in results.iter().enumerate() {
            if let PlacementResult::Placed(p) = result {
                blit(
                    &self.sources[i].1,
                    dest,
                    p.frame.x,
                    p.frame.y,
                    p.source.x,
                    p.source.y,
                    p.source.w,
                    p.source.h,
                    p.rotated,
                );
            }
        }

        let entries = self
            .sources
            .iter()
            .zip(results)
            .map(|((name, _), result)| AtlasEntry {
                name: name.clone(),
                result,
            })
            .collect();
        let atlas = AtlasResult {
            width: out_w,
            height: out_h,
            entries,
        };
        let stats = atlas.stats();
        debug!(
            placed = stats.num_placed,
            failed = stats.num_failed,
            width = out_w,
            height = out_h,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pack complete"
        );
        Ok(atlas)
    }

    /// Packs into a fresh RGBA image and returns it with the atlas layout.
    pub fn pack(&self, cfg: &PackConfig) -> Result<PackOutput> {
        let mut image = RgbaImage::new(1, 1);
        let atlas = self.pack_into(&mut image, cfg)?;
        Ok(PackOutput { image, atlas })
    }
}

/// A packed atlas image together with its layout.
#[derive(Debug)]
pub struct PackOutput {
    pub image: RgbaImage,
    pub atlas: AtlasResult,
}

impl PackOutput {
    pub fn stats(&self) -> PackStats {
        self.atlas.stats()
    }
}
