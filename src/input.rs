//! Input model: the events the host forwards to the engine each tick.
//!
//! Coordinates are screen-space pixels. The host translates its native window
//! events into `InputEvent`s; the engine never sees the window itself.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// One input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: Button },
    PointerMove { pos: Point },
    PointerUp { pos: Point, button: Button },
    /// Wheel notches; positive scrolls up.
    Wheel { delta: f64 },
    /// The window asked to close. The engine reports it back and leaves shutdown to the host.
    Quit,
}

impl InputEvent {
    /// Screen position carried by pointer events.
    #[must_use]
    pub fn pos(&self) -> Option<Point> {
        match self {
            Self::PointerDown { pos, .. } | Self::PointerMove { pos } | Self::PointerUp { pos, .. } => Some(*pos),
            Self::Wheel { .. } | Self::Quit => None,
        }
    }

    /// Whether this is a press or release of the primary button.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { button: Button::Primary, .. } | Self::PointerUp { button: Button::Primary, .. }
        )
    }
}
