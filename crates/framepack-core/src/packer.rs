use tracing::{debug, trace};

use crate::config::PackConfig;
use crate::model::{FailReason, Rect};

/// Largest width or height the packer will allocate or grow to.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// Best-area-fit packer over a free-region list.
///
/// Each placement takes the top-left corner of the free region wasting
/// the least area, then cuts the placed cell out of every free region it
/// intersects, leaving up to four full-extent remainders per region.
/// Remainders may overlap each other but never a placed cell; regions
/// fully contained in another are pruned after every mutation.
/// Auto-sized canvases start from a seed and double a dimension whenever
/// nothing fits.
#[derive(Debug)]
pub struct BestFitPacker {
    allow_rotate: bool,
    free: Vec<Rect>,
    width: u32,
    height: u32,
    growable: bool,
}

impl BestFitPacker {
    /// `seed` is the starting canvas for auto-sized packing; a fixed-size
    /// config ignores it and never grows.
    pub fn new(cfg: &PackConfig, seed: (u32, u32)) -> Self {
        let (width, height, growable) = match cfg.fixed_size {
            Some((w, h)) => (w, h, false),
            None => (
                seed.0.clamp(1, MAX_CANVAS_DIM),
                seed.1.clamp(1, MAX_CANVAS_DIM),
                true,
            ),
        };
        Self {
            allow_rotate: cfg.allow_rotate,
            free: vec![Rect::new(0, 0, width, height)],
            width,
            height,
            growable,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Finds space for a `w x h` cell, growing an auto-sized canvas as
    /// needed. Returns the placed cell and whether it was rotated.
    pub fn insert(&mut self, w: u32, h: u32) -> std::result::Result<(Rect, bool), FailReason> {
        loop {
            if let Some((idx, rotated)) = self.find(w, h) {
                let (cw, ch) = if rotated { (h, w) } else { (w, h) };
                return Ok((self.place(idx, cw, ch), rotated));
            }
            if !self.growable {
                return Err(FailReason::DoesNotFit);
            }
            if !self.grow() {
                return Err(FailReason::CanvasLimitExceeded);
            }
        }
    }

    /// Best candidate under the key `(leftover area, rotated, y, x)`,
    /// minimized with strict-less comparison so the earliest free region
    /// wins exact ties.
    fn find(&self, w: u32, h: u32) -> Option<(usize, bool)> {
        let cell_area = (w as u64) * (h as u64);
        let mut best: Option<(usize, bool)> = None;
        let mut best_key = (u64::MAX, u8::MAX, u32::MAX, u32::MAX);
        for (i, fr) in self.free.iter().enumerate() {
            if fr.w >= w && fr.h >= h {
                let key = (fr.area() - cell_area, 0u8, fr.y, fr.x);
                if key < best_key {
                    best_key = key;
                    best = Some((i, false));
                }
            }
            if self.allow_rotate && fr.w >= h && fr.h >= w {
                let key = (fr.area() - cell_area, 1u8, fr.y, fr.x);
                if key < best_key {
                    best_key = key;
                    best = Some((i, true));
                }
            }
        }
        best
    }

    fn place(&mut self, idx: usize, cw: u32, ch: u32) -> Rect {
        let chosen = self.free[idx];
        let cell = Rect::new(chosen.x, chosen.y, cw, ch);
        let mut split: Vec<Rect> = Vec::new();
        let mut i = 0;
        while i < self.free.len() {
            if Self::intersects(&self.free[i], &cell) {
                let fr = self.free.swap_remove(i);
                Self::subtract(&fr, &cell, &mut split);
            } else {
                i += 1;
            }
        }
        self.free.append(&mut split);
        self.prune();
        trace!(
            x = cell.x,
            y = cell.y,
            w = cw,
            h = ch,
            free = self.free.len(),
            "placed cell"
        );
        cell
    }

    fn intersects(a: &Rect, b: &Rect) -> bool {
        a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
    }

    /// Pushes the parts of `fr` not covered by `cell`. Each remainder
    /// spans the full extent of `fr` along its untouched axis, so the
    /// remainders may overlap. Caller must ensure the two intersect.
    fn subtract(fr: &Rect, cell: &Rect, out: &mut Vec<Rect>) {
        if cell.x > fr.x {
            out.push(Rect::new(fr.x, fr.y, cell.x - fr.x, fr.h));
        }
        let fr_right = fr.x + fr.w;
        let cell_right = cell.x + cell.w;
        if cell_right < fr_right {
            out.push(Rect::new(cell_right, fr.y, fr_right - cell_right, fr.h));
        }
        if cell.y > fr.y {
            out.push(Rect::new(fr.x, fr.y, fr.w, cell.y - fr.y));
        }
        let fr_bottom = fr.y + fr.h;
        let cell_bottom = cell.y + cell.h;
        if cell_bottom < fr_bottom {
            out.push(Rect::new(fr.x, cell_bottom, fr.w, fr_bottom - cell_bottom));
        }
    }

    /// Drops every free region fully contained in another.
    fn prune(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut removed = false;
            let mut j = i + 1;
            while j < self.free.len() {
                if self.free[j].contains(&self.free[i]) {
                    self.free.swap_remove(i);
                    removed = true;
                    break;
                }
                if self.free[i].contains(&self.free[j]) {
                    self.free.swap_remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed {
                i += 1;
            }
        }
    }

    /// Doubles the shorter dimension (ties widen), falling back to the
    /// other when it is already at `MAX_CANVAS_DIM`. Free regions touching
    /// the moved edge are extended into the new area.
    fn grow(&mut self) -> bool {
        if self.width >= MAX_CANVAS_DIM && self.height >= MAX_CANVAS_DIM {
            return false;
        }
        let old_w = self.width;
        let old_h = self.height;
        let widen = if self.width >= MAX_CANVAS_DIM {
            false
        } else if self.height >= MAX_CANVAS_DIM {
            true
        } else {
            self.width <= self.height
        };
        if widen {
            self.width = self.width.saturating_mul(2).min(MAX_CANVAS_DIM);
            for fr in &mut self.free {
                if fr.x + fr.w == old_w {
                    fr.w += self.width - old_w;
                }
            }
            self.free
                .push(Rect::new(old_w, 0, self.width - old_w, self.height));
        } else {
            self.height = self.height.saturating_mul(2).min(MAX_CANVAS_DIM);
            for fr in &mut self.free {
                if fr.y + fr.h == old_h {
                    fr.h += self.height - old_h;
                }
            }
            self.free
                .push(Rect::new(0, old_h, self.width, self.height - old_h));
        }
        self.prune();
        debug!(width = self.width, height = self.height, "grew canvas");
        true
    }
}
