//! Press/move/release drag tracking shared by every pointer modality.
//!
//! Input adapters (see `input.rs`) turn raw mouse or touch events into
//! [`PointerSignal`]s; the wall feeds those into a single [`DragTracker`].

use crate::photo::PhotoId;
use egui::{Pos2, Vec2};
use std::cell::Cell;
use std::rc::Rc;

/// Modality-independent pointer event, in wall coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerSignal {
    Press(Pos2),
    Move(Pos2),
    Release,
    /// The pointer was lost mid-gesture (left the window, touch cancelled).
    Cancel,
}

/// Surface-wide move/release subscriptions held by in-flight drags.
///
/// A drag holds a [`ListenerLease`] from press until it ends, which is how it keeps
/// receiving moves after the pointer leaves its tile. Leases return themselves on drop.
#[derive(Debug, Default, Clone)]
pub struct SurfaceListeners {
    active: Rc<Cell<usize>>,
}

impl SurfaceListeners {
    pub fn subscribe(&self) -> ListenerLease {
        self.active.set(self.active.get() + 1);
        ListenerLease {
            active: Rc::clone(&self.active),
        }
    }

    /// Number of leases currently outstanding.
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

#[derive(Debug)]
pub struct ListenerLease {
    active: Rc<Cell<usize>>,
}

impl Drop for ListenerLease {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}

#[derive(Debug)]
struct DragSession {
    item: PhotoId,
    /// Pointer minus tile position at press time.
    offset: Vec2,
    origin: Pos2,
    position: Pos2,
    lease: ListenerLease,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// How a finished drag ended up.
#[derive(Clone, Debug, PartialEq)]
pub struct DragOutcome {
    pub item: PhotoId,
    pub position: Pos2,
    /// False for a plain click (press and release without travel).
    pub moved: bool,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
    listeners: SurfaceListeners,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The tile being dragged and its live position.
    pub fn dragged(&self) -> Option<(&PhotoId, Pos2)> {
        match &self.state {
            DragState::Dragging(session) => Some((&session.item, session.position)),
            DragState::Idle => None,
        }
    }

    #[cfg(test)]
    pub fn listeners(&self) -> &SurfaceListeners {
        &self.listeners
    }

    /// Starts dragging `item` whose tile currently sits at `item_pos`.
    /// Returns false, and changes nothing, when a drag is already in progress.
    pub fn press(&mut self, item: PhotoId, pointer: Pos2, item_pos: Pos2) -> bool {
        if self.is_dragging() {
            log::trace!("Ignoring press on {item}: drag already in progress");
            return false;
        }

        log::debug!("Drag start {item} at ({:.1}, {:.1})", pointer.x, pointer.y);
        self.state = DragState::Dragging(DragSession {
            item,
            offset: pointer - item_pos,
            origin: item_pos,
            position: item_pos,
            lease: self.listeners.subscribe(),
        });
        true
    }

    /// Updates the live position. Returns it, or `None` when idle.
    pub fn motion(&mut self, pointer: Pos2) -> Option<Pos2> {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.position = pointer - session.offset;
                Some(session.position)
            }
            DragState::Idle => None,
        }
    }

    /// Ends the drag, returns its lease and hands the final position to `commit`.
    pub fn release(&mut self, commit: impl FnOnce(&PhotoId, Pos2)) -> Option<DragOutcome> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };

        let DragSession {
            item,
            origin,
            position,
            lease,
            ..
        } = session;
        drop(lease);

        log::debug!(
            "Drag end {item} at ({:.1}, {:.1}), {} surface listeners left",
            position.x,
            position.y,
            self.listeners.active()
        );
        commit(&item, position);

        Some(DragOutcome {
            moved: position != origin,
            item,
            position,
        })
    }

    /// Abnormal end of a drag. Commits the last live position like a release.
    pub fn cancel(&mut self, commit: impl FnOnce(&PhotoId, Pos2)) -> Option<DragOutcome> {
        if self.is_dragging() {
            log::debug!("Drag cancelled, committing last position");
        }
        self.release(commit)
    }

    /// Drops any in-flight drag without committing it.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
