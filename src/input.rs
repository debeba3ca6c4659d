//! Mouse and touch adapters that feed the one drag state machine.

use crate::drag::PointerSignal;
use egui::{Event, PointerButton, Pos2, TouchId, TouchPhase, Vec2};

/// Turns raw egui events of one modality into [`PointerSignal`]s.
pub trait PointerAdapter {
    fn translate(&mut self, event: &Event) -> Option<PointerSignal>;

    /// True while this modality has a press in progress.
    fn is_active(&self) -> bool;
}

/// Primary mouse button plus cursor motion.
#[derive(Debug, Default)]
pub struct MouseAdapter {
    pressed: bool,
}

impl PointerAdapter for MouseAdapter {
    fn translate(&mut self, event: &Event) -> Option<PointerSignal> {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    self.pressed = true;
                    Some(PointerSignal::Press(*pos))
                } else if std::mem::take(&mut self.pressed) {
                    Some(PointerSignal::Release)
                } else {
                    None
                }
            }
            Event::PointerMoved(pos) => Some(PointerSignal::Move(*pos)),
            Event::PointerGone if std::mem::take(&mut self.pressed) => {
                Some(PointerSignal::Cancel)
            }
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.pressed
    }
}

/// Single-finger touch. Only the first contact is followed; any other finger that
/// lands while it is down is ignored.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    tracked: Option<TouchId>,
}

impl PointerAdapter for TouchAdapter {
    fn translate(&mut self, event: &Event) -> Option<PointerSignal> {
        let Event::Touch { id, phase, pos, .. } = event else {
            return None;
        };

        match (phase, self.tracked) {
            (TouchPhase::Start, None) => {
                self.tracked = Some(*id);
                Some(PointerSignal::Press(*pos))
            }
            (TouchPhase::Move, Some(tracked)) if tracked == *id => Some(PointerSignal::Move(*pos)),
            (TouchPhase::End, Some(tracked)) if tracked == *id => {
                self.tracked = None;
                Some(PointerSignal::Release)
            }
            (TouchPhase::Cancel, Some(tracked)) if tracked == *id => {
                self.tracked = None;
                Some(PointerSignal::Cancel)
            }
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.tracked.is_some()
    }
}

/// Merges both adapters into one signal stream in wall coordinates.
///
/// egui mirrors the first touch as synthetic mouse events, so mouse signals are
/// dropped while a touch is being followed.
#[derive(Debug, Default)]
pub struct InputRouter {
    mouse: MouseAdapter,
    touch: TouchAdapter,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `origin` is the screen position of the wall's top-left corner.
    pub fn route(&mut self, events: &[Event], origin: Pos2) -> Vec<PointerSignal> {
        let offset = origin.to_vec2();
        let mut signals = Vec::new();
        for event in events {
            let was_touching = self.touch.is_active();
            let signal = match self.touch.translate(event) {
                Some(signal) => Some(signal),
                None if !was_touching && !self.touch.is_active() => self.mouse.translate(event),
                None => None,
            };
            if let Some(signal) = signal {
                signals.push(to_wall(signal, offset));
            }
        }
        signals
    }
}

fn to_wall(signal: PointerSignal, offset: Vec2) -> PointerSignal {
    match signal {
        PointerSignal::Press(pos) => PointerSignal::Press(pos - offset),
        PointerSignal::Move(pos) => PointerSignal::Move(pos - offset),
        other => other,
    }
}
