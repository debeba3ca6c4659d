//! Random scatter layout for photo tiles.
//!
//! Every tile gets a uniformly sampled scale, tilt and position. Samples whose
//! margin-inflated box touches an already accepted tile are rejected and redrawn.
//! One retry budget is shared by the whole pass; when it runs out the remaining
//! tiles are placed without the overlap check so that generation always terminates.

use crate::config::WallConfig;
use crate::photo::PhotoId;
use egui::{pos2, Pos2, Rect, Vec2};
use rand::Rng;
use std::collections::HashMap;

/// Generated layout data for a single tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    /// Input-order rank. Informational only, stacking is owned by the z-stack.
    pub z: i32,
}

impl Placement {
    /// Top-left corner of the tile on the wall.
    pub fn position(&self) -> Pos2 {
        pos2(self.left, self.top)
    }

    /// Axis-aligned box of the scaled tile, ignoring rotation.
    pub fn footprint(&self, item_size: f32) -> Rect {
        Rect::from_min_size(self.position(), Vec2::splat(item_size * self.scale))
    }
}

/// Result of one generation pass.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    placements: HashMap<PhotoId, Placement>,
    attempts: usize,
    crowded: bool,
}

impl Layout {
    pub fn get(&self, id: &PhotoId) -> Option<&Placement> {
        self.placements.get(id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of samples drawn from the shared budget.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// True when the budget ran out and at least one tile skipped the overlap check.
    pub fn is_crowded(&self) -> bool {
        self.crowded
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacementGenerator {
    item_size: f32,
    margin: f32,
    retry_budget: usize,
    max_rotation_deg: f32,
    scale_range: [f32; 2],
}

impl PlacementGenerator {
    pub fn new(config: &WallConfig) -> Self {
        Self {
            item_size: config.item_size,
            margin: config.margin,
            retry_budget: config.retry_budget,
            max_rotation_deg: config.max_rotation_deg,
            scale_range: config.scale_range,
        }
    }

    pub fn item_size(&self) -> f32 {
        self.item_size
    }

    /// Produces one placement per distinct id in `items`.
    pub fn generate<R: Rng + ?Sized>(&self, items: &[PhotoId], wall: Vec2, rng: &mut R) -> Layout {
        let wall = sanitize_wall(wall);
        let mut accepted: Vec<Rect> = Vec::with_capacity(items.len());
        let mut placements = HashMap::with_capacity(items.len());
        let mut attempts = 0;
        let mut crowded = false;

        for (rank, id) in items.iter().enumerate() {
            let mut fitted = None;
            let mut last_sample = None;

            while attempts < self.retry_budget {
                attempts += 1;
                let sample = self.sample(wall, rng);
                if self.fits(&sample, &accepted) {
                    fitted = Some(sample);
                    break;
                }
                last_sample = Some(sample);
            }

            let mut placement = match fitted {
                Some(placement) => placement,
                None => {
                    crowded = true;
                    // Budget already spent before this tile started: one unchecked draw.
                    last_sample.unwrap_or_else(|| self.sample(wall, rng))
                }
            };
            placement.z = rank as i32;

            accepted.push(placement.footprint(self.item_size));
            placements.insert(id.clone(), placement);
        }

        if crowded {
            log::warn!(
                "Placement budget of {} exhausted for {} photos on a {:.0}x{:.0} wall; accepting overlap",
                self.retry_budget,
                items.len(),
                wall.x,
                wall.y
            );
        } else {
            log::debug!(
                "Placed {} photos on a {:.0}x{:.0} wall in {} attempts",
                placements.len(),
                wall.x,
                wall.y,
                attempts
            );
        }

        Layout {
            placements,
            attempts,
            crowded,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, wall: Vec2, rng: &mut R) -> Placement {
        let [min_scale, max_scale] = self.scale_range;
        let scale = sample_range(rng, min_scale, max_scale);
        let rotation_deg = sample_range(rng, -self.max_rotation_deg, self.max_rotation_deg);

        let extent = self.item_size * scale;
        let top = sample_range(rng, self.margin, wall.y - extent - self.margin);
        let left = sample_range(rng, self.margin, wall.x - extent - self.margin);

        Placement {
            top,
            left,
            rotation_deg,
            scale,
            z: 0,
        }
    }

    fn fits(&self, candidate: &Placement, accepted: &[Rect]) -> bool {
        let inflated = candidate.footprint(self.item_size).expand(self.margin);
        !accepted.iter().any(|rect| rect.intersects(inflated))
    }
}

/// Uniform draw from `[lo, hi]`, collapsing to `lo` when the range is empty.
fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

fn sanitize_wall(wall: Vec2) -> Vec2 {
    let axis = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Vec2::new(axis(wall.x), axis(wall.y))
}
