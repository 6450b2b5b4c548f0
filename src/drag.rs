//! Drag controller: the per-entity pointer state machine.
//!
//! ```text
//! Idle --press inside bbox--> Dragging --move--> Dragging
//! Dragging --release--> Idle | Combining | removed   (decided by the coordinator)
//! ```
//!
//! A press is offered to entities topmost first and the first bounding box
//! containing the point wins; nobody else may start dragging for that press.
//! A press while another entity is already being dragged is swallowed
//! ([`Press::Busy`]), so at most one entity is ever in `Dragging` and the
//! press cannot fall through to anything underneath.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::entity::{EntityId, EntityState};
use crate::geom::Point;
use crate::store::EntityStore;

/// Result of offering a pointer press to the entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// The entity was picked up and raised to the front.
    Started(EntityId),
    /// The topmost entity under the pointer is waiting on a combination; the press stops there.
    Blocked(EntityId),
    /// Another entity is already being dragged; the press is consumed without effect.
    Busy(EntityId),
    /// No entity claimed the press.
    Missed,
}

/// Offer a press at `pos` to the entities, topmost first.
pub fn press(store: &mut EntityStore, pos: Point) -> Press {
    if let Some(dragged) = store.dragging() {
        return Press::Busy(dragged);
    }
    let Some(id) = store
        .ids_top_down()
        .into_iter()
        .find(|id| store.get(id).is_some_and(|e| e.bounding_box().contains(pos)))
    else {
        return Press::Missed;
    };
    let Some(entity) = store.get_mut(&id) else {
        return Press::Missed;
    };
    if entity.is_processing() {
        return Press::Blocked(id);
    }
    let grab = pos.offset_from(entity.position());
    entity.set_state(EntityState::Dragging { grab });
    store.bring_to_front(&id);
    Press::Started(id)
}

/// Move the dragged entity so the grab point stays under the pointer.
pub fn drag_to(store: &mut EntityStore, pos: Point) -> Option<EntityId> {
    let id = store.dragging()?;
    let entity = store.get_mut(&id)?;
    let EntityState::Dragging { grab } = entity.state() else {
        return None;
    };
    entity.set_position(pos.offset_from(grab));
    Some(id)
}
