//! Toolkit-neutral input events and how a session reacts to them.
//!
//! Left button selects, right button pans, Ctrl+wheel zooms around the
//! pointer, Escape cancels and Enter commits the draft.

use crate::error::EditorResult;
use crate::geometry::Point;
use crate::selection::DragOutcome;
use crate::session::Session;
use crate::view::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
}

/// Positions are in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerDown { button: PointerButton, position: Point },
    PointerMove { position: Point },
    PointerUp { button: PointerButton, position: Point },
    /// Negative `delta_y` scrolls up, which zooms in.
    Wheel { delta_y: f64, ctrl: bool, position: Point },
    Key(Key),
}

impl Session {
    /// Routes one input event. Returns whether the event was consumed.
    pub fn handle(&mut self, input: Input) -> EditorResult<bool> {
        let handled = match input {
            Input::PointerDown { button: PointerButton::Left, position } => {
                self.pointer_down(position)
            }
            Input::PointerDown { button: PointerButton::Right, position } => {
                self.begin_pan(position)
            }
            Input::PointerDown { .. } => false,

            Input::PointerMove { position } => {
                if self.is_panning() {
                    self.drag_pan(position)
                } else {
                    self.pointer_move(position)
                }
            }

            Input::PointerUp { button: PointerButton::Left, position } => {
                self.pointer_up(position) != DragOutcome::Ignored
            }
            Input::PointerUp { button: PointerButton::Right, .. } => self.end_pan(),
            Input::PointerUp { .. } => false,

            Input::Wheel { delta_y, ctrl: true, position } if delta_y != 0.0 => {
                let factor = if delta_y < 0.0 { WHEEL_ZOOM_IN } else { WHEEL_ZOOM_OUT };
                self.zoom_at(factor, position);
                true
            }
            Input::Wheel { .. } => false,

            Input::Key(Key::Escape) => self.cancel_selection(),
            Input::Key(Key::Enter) => self.commit_draft()?,
        };
        Ok(handled)
    }
}
