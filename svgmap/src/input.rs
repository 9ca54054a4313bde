//! Input model: location events, key codes, and the actions handed back to the host.
//!
//! The host translates its own DOM (or toolkit) events into `LocationEvent`s
//! targeted at a shape id and feeds them to the renderer or a controller.
//! Handlers mark an event with [`LocationEvent::prevent_default`] when the
//! host should suppress its default behavior, and controllers return
//! [`Action`]s describing follow-up work the host has to perform.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Serialize;

use crate::render::ShapeHandle;

/// The seven event kinds bound on every shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Pointer entered the shape.
    MouseOver,
    /// Pointer left the shape.
    MouseOut,
    /// Pointer moved over the shape.
    MouseMove,
    /// Primary activation (mouse click or tap).
    Click,
    /// A key was pressed while the shape had focus.
    KeyDown,
    /// The shape received keyboard focus.
    Focus,
    /// The shape lost keyboard focus.
    Blur,
}

impl EventKind {
    /// Every kind, in binding order.
    pub const ALL: [Self; 7] = [
        Self::MouseOver,
        Self::MouseOut,
        Self::MouseMove,
        Self::Click,
        Self::KeyDown,
        Self::Focus,
        Self::Blur,
    ];
}

/// A keyboard key, identified by its legacy DOM key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Spacebar: the activation key for both selection modes.
    pub const SPACE: Self = Self(32);
    pub const ARROW_LEFT: Self = Self(37);
    pub const ARROW_UP: Self = Self(38);
    pub const ARROW_RIGHT: Self = Self(39);
    pub const ARROW_DOWN: Self = Self(40);

    /// Map a browser `KeyboardEvent.key` name to a key code.
    ///
    /// Only the keys the controllers interpret are known; everything else
    /// returns `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            " " | "Space" | "Spacebar" => Some(Self::SPACE),
            "ArrowLeft" | "Left" => Some(Self::ARROW_LEFT),
            "ArrowUp" | "Up" => Some(Self::ARROW_UP),
            "ArrowRight" | "Right" => Some(Self::ARROW_RIGHT),
            "ArrowDown" | "Down" => Some(Self::ARROW_DOWN),
            _ => None,
        }
    }

    /// Whether this is the activation key.
    #[must_use]
    pub fn is_activation(self) -> bool {
        self == Self::SPACE
    }

    /// Navigation direction for arrow keys; `None` for any other key.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ARROW_RIGHT | Self::ARROW_DOWN => Some(Direction::Next),
            Self::ARROW_LEFT | Self::ARROW_UP => Some(Direction::Previous),
            _ => None,
        }
    }
}

/// Direction of arrow-key navigation in map order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A raw event targeted at one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEvent {
    /// What happened.
    pub kind: EventKind,
    /// Resolved id of the shape the event was fired on.
    pub target: String,
    /// Pressed key, for `KeyDown` events.
    pub key: Option<Key>,
    default_prevented: bool,
}

impl LocationEvent {
    #[must_use]
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self { kind, target: target.into(), key: None, default_prevented: false }
    }

    #[must_use]
    pub fn click(target: impl Into<String>) -> Self {
        Self::new(EventKind::Click, target)
    }

    #[must_use]
    pub fn key_down(target: impl Into<String>, key: Key) -> Self {
        Self { key: Some(key), ..Self::new(EventKind::KeyDown, target) }
    }

    /// Ask the host to suppress its default handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Follow-up work returned from controller event handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Selection changed; the host should redraw from the controller's view.
    RenderNeeded,
    /// Move keyboard focus to this shape.
    Focus(ShapeHandle),
}
