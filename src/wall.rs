//! State owned by one wall view: generated layout, committed overrides, paint order
//! and the in-flight drag.
//!
//! Everything here is synchronous and in-memory. The view creates a [`WallState`] when
//! it opens, feeds it photo lists and pointer signals, and calls [`WallState::reset`]
//! when it is torn down.

use crate::config::WallConfig;
use crate::drag::{DragOutcome, DragTracker, PointerSignal};
use crate::library::{LibraryError, PhotoSource};
use crate::overrides::OverrideStore;
use crate::photo::PhotoId;
use crate::placement::{Layout, Placement, PlacementGenerator};
use crate::z_stack::ZStack;
use egui::emath::Rot2;
use egui::{Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Who is looking at the wall. Only gates side effects; it is not an access check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallMode {
    pub read_only: bool,
    pub owner: Option<String>,
}

impl WallMode {
    /// Heading for the wall: a shared wall names its owner.
    pub fn title(&self) -> String {
        match (&self.owner, self.read_only) {
            (Some(owner), true) => format!("{owner}'s Wall"),
            (None, true) => "Friend's Wall".to_string(),
            _ => "My Photo Wall".to_string(),
        }
    }
}

/// Everything the renderer needs to draw one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayout {
    pub id: PhotoId,
    pub position: Pos2,
    pub rotation_deg: f32,
    pub scale: f32,
    /// Side of the scaled tile.
    pub extent: f32,
    pub z_index: i32,
    pub is_top: bool,
    pub is_dragging: bool,
}

impl TileLayout {
    /// Unrotated box of the tile in wall coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::splat(self.extent))
    }

    /// Tilt about the tile's centre.
    pub fn rotation(&self) -> Rot2 {
        Rot2::from_angle(self.rotation_deg.to_radians())
    }

    /// True when `pos` lies on the tile as drawn, tilt included.
    pub fn contains(&self, pos: Pos2) -> bool {
        let local = self.rotation().inverse() * (pos - self.rect().center());
        let half = self.extent / 2.0;
        local.x.abs() <= half && local.y.abs() <= half
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WallResponse {
    /// Nothing on the wall reacted.
    Ignored,
    /// A press landed on a tile; it was raised and a drag started. Not propagated.
    Grabbed(PhotoId),
    Moved(PhotoId, Pos2),
    Dropped(DragOutcome),
    /// A press on empty wall space, for wall-level handlers.
    Background(Pos2),
}

pub struct WallState {
    generator: PlacementGenerator,
    rng: StdRng,
    items: Vec<PhotoId>,
    wall_size: Vec2,
    layout: Layout,
    overrides: OverrideStore,
    z_stack: ZStack,
    drag: DragTracker,
    mode: WallMode,
}

impl WallState {
    pub fn new(config: &WallConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: &WallConfig, rng: StdRng) -> Self {
        Self {
            generator: PlacementGenerator::new(config),
            rng,
            items: Vec::new(),
            wall_size: Vec2::ZERO,
            layout: Layout::default(),
            overrides: OverrideStore::new(),
            z_stack: ZStack::new(),
            drag: DragTracker::new(),
            mode: WallMode {
                read_only: config.read_only,
                owner: config.owner.clone(),
            },
        }
    }

    pub fn mode(&self) -> &WallMode {
        &self.mode
    }

    pub fn is_read_only(&self) -> bool {
        self.mode.read_only
    }

    #[cfg(test)]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[cfg(test)]
    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    #[cfg(test)]
    pub fn z_stack(&self) -> &ZStack {
        &self.z_stack
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    #[cfg(test)]
    pub fn wall_size(&self) -> Vec2 {
        self.wall_size
    }

    /// New photo list (fetch, upload or shuffle): regenerates the layout and restacks
    /// in list order. Overrides are kept.
    pub fn refresh(&mut self, items: Vec<PhotoId>, wall_size: Vec2) {
        if let Some((id, _)) = self.drag.dragged() {
            log::debug!("Refresh dropped the in-flight drag of {id}");
        }
        self.drag.reset();
        self.items = items;
        self.wall_size = wall_size;
        self.layout = self
            .generator
            .generate(&self.items, self.wall_size, &mut self.rng);
        self.z_stack.reseed(&self.items);
        log::debug!(
            "Wall refreshed: {} photos, {} overrides, {} placement samples{}",
            self.layout.len(),
            self.overrides.len(),
            self.layout.attempts(),
            if self.layout.is_crowded() { " (crowded)" } else { "" }
        );
    }

    /// Regenerates the layout when the wall changed size. Paint order is untouched.
    pub fn resize(&mut self, wall_size: Vec2) -> bool {
        if (wall_size - self.wall_size).abs().max_elem() <= 0.5 {
            return false;
        }
        self.wall_size = wall_size;
        self.layout = self
            .generator
            .generate(&self.items, self.wall_size, &mut self.rng);
        true
    }

    /// Live drag position, else the committed override, else the generated placement.
    pub fn effective_position(&self, id: &PhotoId) -> Option<Pos2> {
        if let Some((dragged, position)) = self.drag.dragged() {
            if dragged == id {
                return Some(position);
            }
        }
        self.overrides
            .get(id)
            .or_else(|| self.layout.get(id).map(Placement::position))
    }

    /// Tiles in paint order, bottom first.
    pub fn tiles(&self) -> Vec<TileLayout> {
        let top = self.z_stack.top();
        let dragged = self.drag.dragged().map(|(id, _)| id);
        self.z_stack
            .iter()
            .filter_map(|id| {
                let placement = self.layout.get(id)?;
                Some(TileLayout {
                    id: id.clone(),
                    position: self.effective_position(id)?,
                    rotation_deg: placement.rotation_deg,
                    scale: placement.scale,
                    extent: self.generator.item_size() * placement.scale,
                    z_index: self.z_stack.z_index(id)?,
                    is_top: top == Some(id),
                    is_dragging: dragged == Some(id),
                })
            })
            .collect()
    }

    /// Topmost tile drawn under `pos`.
    pub fn hit_test(&self, pos: Pos2) -> Option<PhotoId> {
        self.tiles()
            .into_iter()
            .rev()
            .find(|tile| tile.contains(pos))
            .map(|tile| tile.id)
    }

    pub fn bring_to_top(&mut self, id: &PhotoId) {
        self.z_stack.bring_to_top(id);
    }

    pub fn handle(&mut self, signal: PointerSignal) -> WallResponse {
        match signal {
            PointerSignal::Press(pos) => self.press(pos),
            PointerSignal::Move(pos) => match self.drag.motion(pos) {
                Some(position) => match self.drag.dragged() {
                    Some((id, _)) => WallResponse::Moved(id.clone(), position),
                    None => WallResponse::Ignored,
                },
                None => WallResponse::Ignored,
            },
            PointerSignal::Release => {
                let commit = commit_override(&mut self.overrides, self.mode.read_only);
                self.drag
                    .release(commit)
                    .map_or(WallResponse::Ignored, WallResponse::Dropped)
            }
            PointerSignal::Cancel => {
                let commit = commit_override(&mut self.overrides, self.mode.read_only);
                self.drag
                    .cancel(commit)
                    .map_or(WallResponse::Ignored, WallResponse::Dropped)
            }
        }
    }

    fn press(&mut self, pos: Pos2) -> WallResponse {
        if self.drag.is_dragging() {
            return WallResponse::Ignored;
        }
        let Some(id) = self.hit_test(pos) else {
            return WallResponse::Background(pos);
        };
        let Some(item_pos) = self.effective_position(&id) else {
            return WallResponse::Ignored;
        };

        self.bring_to_top(&id);
        self.drag.press(id.clone(), pos, item_pos);
        WallResponse::Grabbed(id)
    }

    /// Deletes the photo through `source`. Returns `Ok(false)` without touching the
    /// source when the wall is read-only.
    pub fn delete<S: PhotoSource + ?Sized>(
        &mut self,
        id: &PhotoId,
        source: &mut S,
    ) -> Result<bool, LibraryError> {
        if self.mode.read_only {
            log::debug!("Delete of {id} suppressed on a read-only wall");
            return Ok(false);
        }
        source.delete(id)?;
        Ok(true)
    }

    /// Teardown: forgets every override, the paint order and any in-flight drag.
    pub fn reset(&mut self) {
        if !self.overrides.is_empty() {
            log::debug!("Discarding {} overrides", self.overrides.len());
        }
        self.drag.reset();
        self.overrides.clear();
        self.z_stack.clear();
        self.layout = Layout::default();
        self.items.clear();
        self.wall_size = Vec2::ZERO;
    }
}

/// Commit callback for finished drags. On a read-only wall it records nothing.
fn commit_override(
    overrides: &mut OverrideStore,
    read_only: bool,
) -> impl FnOnce(&PhotoId, Pos2) + '_ {
    move |id, position| {
        if read_only {
            log::debug!("Drag of {id} not committed on a read-only wall");
        } else {
            overrides.record(id.clone(), position);
        }
    }
}

/// Size to lay the wall out in: the measured canvas, or the viewport while the
/// canvas has no usable size yet.
pub fn measured_wall_size(canvas: Vec2, viewport: Vec2) -> Vec2 {
    let usable = canvas.x.is_finite() && canvas.y.is_finite() && canvas.x > 0.0 && canvas.y > 0.0;
    if usable {
        canvas
    } else {
        viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::Photo;
    use egui::{pos2, vec2};
    use std::path::PathBuf;

    fn ids(names: &[&str]) -> Vec<PhotoId> {
        names.iter().map(|&n| PhotoId::from(n)).collect()
    }

    fn wall_with(config: &WallConfig, names: &[&str]) -> WallState {
        let mut wall = WallState::with_rng(config, StdRng::seed_from_u64(42));
        wall.refresh(ids(names), vec2(1000.0, 800.0));
        wall
    }

    fn wall(names: &[&str]) -> WallState {
        wall_with(&WallConfig::default(), names)
    }

    fn assert_close(actual: Pos2, expected: Pos2) {
        assert!(
            (actual - expected).length() < 1e-3,
            "{actual:?} is not close to {expected:?}"
        );
    }

    fn center_of(wall: &WallState, id: &str) -> Pos2 {
        wall.tiles()
            .into_iter()
            .find(|t| t.id.as_str() == id)
            .unwrap()
            .rect()
            .center()
    }

    #[derive(Default)]
    struct RecordingSource {
        deleted: Vec<PhotoId>,
    }

    impl PhotoSource for RecordingSource {
        fn fetch(&self) -> Result<Vec<Photo>, LibraryError> {
            Ok(Vec::new())
        }

        fn resolve(&self, photo: &Photo) -> PathBuf {
            photo.file_path.clone()
        }

        fn delete(&mut self, id: &PhotoId) -> Result<(), LibraryError> {
            self.deleted.push(id.clone());
            Ok(())
        }
    }

    #[test]
    fn every_item_gets_one_placement_and_one_stack_entry() {
        let wall = wall(&["a", "b", "c"]);
        assert_eq!(wall.layout().len(), 3);
        assert_eq!(wall.z_stack().len(), 3);
        assert_eq!(wall.tiles().len(), 3);
    }

    #[test]
    fn tiles_are_in_strictly_increasing_z_order() {
        let mut wall = wall(&["a", "b", "c"]);
        wall.bring_to_top(&PhotoId::from("a"));
        let tiles = wall.tiles();
        assert!(tiles.windows(2).all(|w| w[0].z_index < w[1].z_index));
        assert_eq!(tiles.last().unwrap().id.as_str(), "a");
        assert!(tiles.last().unwrap().is_top);
    }

    #[test]
    fn drag_commits_override_and_raises_tile() {
        let mut wall = wall(&["a", "b", "c"]);
        let a = PhotoId::from("a");
        let initial = wall.effective_position(&a).unwrap();
        let p0 = center_of(&wall, "a");
        assert_eq!(wall.hit_test(p0), Some(a.clone()));

        assert_eq!(wall.handle(PointerSignal::Press(p0)), WallResponse::Grabbed(a.clone()));
        assert_eq!(wall.z_stack().top(), Some(&a));
        assert_eq!(wall.drag().listeners().active(), 1);

        wall.handle(PointerSignal::Move(p0 + vec2(5.0, 5.0)));
        let p2 = p0 + vec2(-40.0, 70.0);
        wall.handle(PointerSignal::Move(p2));
        let response = wall.handle(PointerSignal::Release);

        let expected = initial + (p2 - p0);
        let WallResponse::Dropped(outcome) = response else {
            panic!("expected the drag to end in a drop");
        };
        assert_eq!(outcome.item, a);
        assert_close(outcome.position, expected);
        assert_close(wall.overrides().get(&a).unwrap(), expected);
        assert_close(wall.effective_position(&a).unwrap(), expected);
        assert_eq!(wall.drag().listeners().active(), 0);
    }

    #[test]
    fn live_drag_position_is_rendered() {
        let mut wall = wall(&["a"]);
        let p0 = center_of(&wall, "a");
        let before = wall.effective_position(&PhotoId::from("a")).unwrap();
        wall.handle(PointerSignal::Press(p0));
        wall.handle(PointerSignal::Move(p0 + vec2(10.0, 0.0)));

        let tile = &wall.tiles()[0];
        assert!(tile.is_dragging);
        assert_close(tile.position, before + vec2(10.0, 0.0));
        assert!(wall.overrides().is_empty());
    }

    #[test]
    fn click_without_motion_raises_tile() {
        let mut wall = wall(&["a", "b", "c"]);
        let bottom = wall.z_stack().iter().next().unwrap().clone();
        let p = center_of(&wall, bottom.as_str());

        wall.handle(PointerSignal::Press(p));
        let response = wall.handle(PointerSignal::Release);
        assert_eq!(wall.z_stack().top(), Some(&bottom));
        assert!(matches!(response, WallResponse::Dropped(ref o) if !o.moved));
    }

    #[test]
    fn tilted_tile_is_hit_on_its_drawn_outline() {
        let tile = TileLayout {
            id: PhotoId::from("a"),
            position: pos2(100.0, 100.0),
            rotation_deg: 14.0,
            scale: 1.0,
            extent: 192.0,
            z_index: 10,
            is_top: true,
            is_dragging: false,
        };
        let center = tile.rect().center();
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let drawn_corner = center + tile.rotation() * vec2(sx * 94.0, sy * 94.0);
            assert!(tile.contains(drawn_corner), "{drawn_corner:?}");
            let box_corner = center + vec2(sx * 95.0, sy * 95.0);
            assert!(!tile.contains(box_corner), "{box_corner:?}");
        }
    }

    #[test]
    fn press_on_any_drawn_corner_grabs_the_tile() {
        let mut wall = wall(&["a"]);
        let a = PhotoId::from("a");
        let tile = wall.tiles()[0].clone();
        let center = tile.rect().center();
        let half = tile.extent / 2.0 - 2.0;

        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = center + tile.rotation() * vec2(sx * half, sy * half);
            assert_eq!(wall.handle(PointerSignal::Press(corner)), WallResponse::Grabbed(a.clone()));
            wall.handle(PointerSignal::Release);
        }
    }

    #[test]
    fn press_on_empty_space_is_background() {
        let mut wall = wall(&["a"]);
        let response = wall.handle(PointerSignal::Press(pos2(-100.0, -100.0)));
        assert_eq!(response, WallResponse::Background(pos2(-100.0, -100.0)));
        assert!(!wall.drag().is_dragging());
        assert_eq!(wall.drag().listeners().active(), 0);
    }

    #[test]
    fn cancel_commits_and_releases_listeners() {
        let mut wall = wall(&["a"]);
        let a = PhotoId::from("a");
        let p0 = center_of(&wall, "a");
        let start = wall.effective_position(&a).unwrap();
        wall.handle(PointerSignal::Press(p0));
        wall.handle(PointerSignal::Move(p0 + vec2(3.0, 4.0)));
        wall.handle(PointerSignal::Cancel);
        assert_close(wall.overrides().get(&a).unwrap(), start + vec2(3.0, 4.0));
        assert_eq!(wall.drag().listeners().active(), 0);
    }

    #[test]
    fn read_only_wall_never_commits_or_deletes() {
        let config = WallConfig {
            read_only: true,
            owner: Some("friend".to_string()),
            ..WallConfig::default()
        };
        let mut wall = wall_with(&config, &["a"]);
        let a = PhotoId::from("a");
        let start = wall.effective_position(&a).unwrap();
        let p0 = center_of(&wall, "a");

        wall.handle(PointerSignal::Press(p0));
        wall.handle(PointerSignal::Move(p0 + vec2(50.0, 50.0)));
        assert_close(wall.effective_position(&a).unwrap(), start + vec2(50.0, 50.0));
        wall.handle(PointerSignal::Release);

        assert!(wall.overrides().is_empty());
        assert_eq!(wall.effective_position(&a), Some(start));

        assert_eq!(wall.mode().title(), "friend's Wall");

        let mut source = RecordingSource::default();
        assert!(!wall.delete(&a, &mut source).unwrap());
        assert!(source.deleted.is_empty());
    }

    #[test]
    fn delete_goes_to_source_when_writable() {
        let mut wall = wall(&["a"]);
        assert_eq!(wall.mode().title(), "My Photo Wall");
        let mut source = RecordingSource::default();
        assert!(wall.delete(&PhotoId::from("a"), &mut source).unwrap());
        assert_eq!(source.deleted, ids(&["a"]));
    }

    #[test]
    fn shrinking_refresh_restacks_to_remaining_ids() {
        let mut wall = wall(&["a", "b", "c"]);
        wall.bring_to_top(&PhotoId::from("a"));
        wall.refresh(ids(&["b"]), vec2(1000.0, 800.0));
        let stack: Vec<&PhotoId> = wall.z_stack().iter().collect();
        assert_eq!(stack, [&PhotoId::from("b")]);
        assert_eq!(wall.tiles().len(), 1);
    }

    #[test]
    fn overrides_survive_refresh() {
        let mut wall = wall(&["a", "b"]);
        let a = PhotoId::from("a");
        let p0 = center_of(&wall, "a");
        wall.handle(PointerSignal::Press(p0));
        wall.handle(PointerSignal::Move(p0 + vec2(-2000.0, 0.0)));
        wall.handle(PointerSignal::Release);
        let committed = wall.overrides().get(&a);
        assert!(committed.is_some());

        wall.refresh(ids(&["a", "b"]), vec2(1000.0, 800.0));
        assert_eq!(wall.overrides().get(&a), committed);
        assert_eq!(wall.effective_position(&a), committed);
        assert_eq!(wall.overrides().len(), 1);
    }

    #[test]
    fn resize_regenerates_layout_only_when_size_changes() {
        let mut wall = wall(&["a", "b"]);
        wall.bring_to_top(&PhotoId::from("a"));
        assert!(!wall.resize(vec2(1000.2, 800.0)));
        assert!(wall.resize(vec2(600.0, 500.0)));
        assert_eq!(wall.wall_size(), vec2(600.0, 500.0));
        assert_eq!(wall.layout().len(), 2);
        assert_eq!(wall.z_stack().top(), Some(&PhotoId::from("a")));
    }

    #[test]
    fn refresh_mid_drag_drops_the_drag() {
        let mut wall = wall(&["a"]);
        wall.handle(PointerSignal::Press(center_of(&wall, "a")));
        wall.refresh(ids(&["a"]), vec2(1000.0, 800.0));
        assert!(!wall.drag().is_dragging());
        assert_eq!(wall.drag().listeners().active(), 0);
        assert_eq!(wall.handle(PointerSignal::Release), WallResponse::Ignored);
        assert!(wall.overrides().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut wall = wall(&["a"]);
        let p0 = center_of(&wall, "a");
        wall.handle(PointerSignal::Press(p0));
        wall.handle(PointerSignal::Release);
        wall.handle(PointerSignal::Press(p0));
        wall.reset();

        assert!(wall.overrides().is_empty());
        assert!(wall.z_stack().is_empty());
        assert!(wall.tiles().is_empty());
        assert_eq!(wall.drag().listeners().active(), 0);
    }

    #[test]
    fn empty_wall_has_no_tiles() {
        let wall = wall(&[]);
        assert!(wall.tiles().is_empty());
        assert_eq!(wall.hit_test(pos2(100.0, 100.0)), None);
    }

    #[test]
    fn unmeasured_canvas_falls_back_to_viewport() {
        let viewport = vec2(1280.0, 720.0);
        assert_eq!(measured_wall_size(vec2(0.0, 300.0), viewport), viewport);
        assert_eq!(measured_wall_size(vec2(f32::NAN, 300.0), viewport), viewport);
        assert_eq!(measured_wall_size(vec2(900.0, 300.0), viewport), vec2(900.0, 300.0));
    }
}
