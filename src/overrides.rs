use crate::photo::PhotoId;
use egui::Pos2;
use std::collections::HashMap;

/// Positions committed by finished drags. They take precedence over generated placements.
///
/// Entries are never removed individually: an override for a photo that left the wall
/// just stops being looked up. The whole store is dropped with the wall view.
#[derive(Debug, Default, Clone)]
pub struct OverrideStore {
    positions: HashMap<PhotoId, Pos2>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the override. Positions outside the wall are accepted as-is.
    pub fn record(&mut self, id: PhotoId, position: Pos2) {
        log::debug!("Override {} -> ({:.1}, {:.1})", id, position.x, position.y);
        self.positions.insert(id, position);
    }

    pub fn get(&self, id: &PhotoId) -> Option<Pos2> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Teardown only.
    pub(crate) fn clear(&mut self) {
        self.positions.clear();
    }
}
