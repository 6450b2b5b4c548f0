//! Entity model: one labeled, draggable tile on the canvas.
//!
//! An `Entity` keeps its measured label size so its bounding box can be
//! recomputed whenever its position changes. Its interaction state is an
//! explicit `EntityState` tag rather than a pair of boolean flags: a tile is
//! either resting, being dragged, or frozen while its combination is pending.
//!
//! Z-order is written only by [`crate::store::EntityStore`]; the interaction
//! state is written only by the drag controller and the combination
//! coordinator.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use uuid::Uuid;

use crate::consts::TILE_MARGIN;
use crate::geom::{Point, Rect, Size};

/// Unique identifier for a canvas entity. Stable for the entity's lifetime.
pub type EntityId = Uuid;

/// Interaction state of a single entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EntityState {
    /// Resting on the canvas, free to be picked up.
    #[default]
    Idle,
    /// Following the pointer.
    Dragging {
        /// Pointer position relative to the entity origin at pick-up.
        grab: Point,
    },
    /// Waiting on a generation request; cannot be dragged or combined again.
    Combining,
}

/// A tile on the canvas.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    label: String,
    position: Point,
    text_size: Size,
    bounding_box: Rect,
    z_order: i64,
    state: EntityState,
}

impl Entity {
    /// Create an idle entity with a fresh id. `text_size` is the measured extent of `label`.
    #[must_use]
    pub fn new(label: impl Into<String>, position: Point, text_size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            position,
            text_size,
            bounding_box: bounding_box_for(position, text_size),
            z_order: 0,
            state: EntityState::Idle,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Top-left corner of the label text.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Hit-test and collision rectangle: the label extent plus a fixed margin.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Rectangle covered by the label text alone.
    #[must_use]
    pub fn text_rect(&self) -> Rect {
        Rect::at(self.position, self.text_size)
    }

    #[must_use]
    pub fn z_order(&self) -> i64 {
        self.z_order
    }

    #[must_use]
    pub fn state(&self) -> EntityState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, EntityState::Dragging { .. })
    }

    /// Whether a combination involving this entity is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.state == EntityState::Combining
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
        self.bounding_box = bounding_box_for(position, self.text_size);
    }

    pub(crate) fn set_state(&mut self, state: EntityState) {
        self.state = state;
    }

    pub(crate) fn set_z_order(&mut self, z_order: i64) {
        self.z_order = z_order;
    }
}

fn bounding_box_for(position: Point, text_size: Size) -> Rect {
    Rect::at(position, text_size).inflate(TILE_MARGIN, TILE_MARGIN)
}
