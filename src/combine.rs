//! Combination coordinator: collision detection, generation requests, and the deferred merge.
//!
//! DESIGN
//! ======
//! On release, the dragged entity is tested against every other live entity in
//! store (insertion) order and the first overlapping one that is not already
//! combining is its partner. One generation request is spawned for the ordered
//! pair `(dragged.label, partner.label)` and both are then frozen in
//! `Combining`. No collision and an overlap with the panel deletes the dragged
//! entity; otherwise it simply stays where it was dropped.
//!
//! Tasks are spawned through a runtime [`Handle`] given at construction, so
//! the host may drive the engine from a thread outside the runtime.
//!
//! Generation tasks never touch the store or the panel. Each one sends a
//! single [`Deferred`] message on an unbounded channel. The engine drains that
//! channel on its own loop and calls [`CombinationCoordinator::apply`], which
//! is the only place a merge mutates shared state.
//!
//! ERROR HANDLING
//! ==============
//! A failed or empty generation unfreezes both parents and creates nothing.
//! A result whose parents are gone (cleared canvas) is dropped; any surviving
//! parent is unfrozen. Neither case is surfaced beyond a log line.

#[cfg(test)]
#[path = "combine_test.rs"]
mod combine_test;

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::entity::{Entity, EntityId, EntityState};
use crate::generator::{GenerationError, Generator};
use crate::geom::{Point, Rect};
use crate::panel::PanelModel;
use crate::render::TextMetrics;
use crate::store::EntityStore;

/// A combination waiting on its generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCombination {
    /// The entity that was dropped.
    pub dragged: EntityId,
    /// The entity it was dropped onto.
    pub partner: EntityId,
    pub dragged_label: String,
    pub partner_label: String,
    /// Parent positions at collision time.
    pub dragged_pos: Point,
    pub partner_pos: Point,
}

impl PendingCombination {
    /// Where the combined entity appears.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.dragged_pos.midpoint(self.partner_pos)
    }
}

/// A unit of work posted by a generation task for the loop to apply.
#[derive(Debug)]
pub struct Deferred {
    pub pending: PendingCombination,
    pub outcome: Result<String, GenerationError>,
}

/// What a release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Nothing was being dragged.
    NotDragging,
    /// Dropped onto another entity; a generation request is in flight.
    Combining { dragged: EntityId, partner: EntityId },
    /// Dropped onto the panel and deleted.
    Deleted(EntityId),
    /// Dropped on empty canvas; stays where it landed.
    Dropped(EntityId),
}

/// How a deferred result was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Both parents were replaced by `child`. `discovered` is true if the label was new to the panel.
    Merged { child: EntityId, label: String, discovered: bool },
    /// Generation failed; the parents are draggable again.
    Failed,
    /// A parent disappeared while the request was in flight; nothing was created.
    Stale,
}

/// Drives combinations from release to merge.
pub struct CombinationCoordinator {
    generator: Arc<dyn Generator>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Deferred>,
    rx: mpsc::UnboundedReceiver<Deferred>,
    in_flight: usize,
}

impl CombinationCoordinator {
    /// Generation requests run as tasks on `runtime`.
    #[must_use]
    pub fn new(generator: Arc<dyn Generator>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { generator, runtime, tx, rx, in_flight: 0 }
    }

    /// Number of generation requests whose results have not been applied yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Resolve the release of the dragged entity, if any.
    pub fn release(&mut self, store: &mut EntityStore, panel_region: Rect) -> Release {
        let Some(dragged) = store.dragging().and_then(|id| store.get(&id)).cloned() else {
            return Release::NotDragging;
        };
        let bbox = dragged.bounding_box();

        let partner = store
            .iter()
            .find(|e| e.id() != dragged.id() && !e.is_processing() && e.bounding_box().overlaps(&bbox))
            .cloned();

        if let Some(partner) = partner {
            let pending = PendingCombination {
                dragged: dragged.id(),
                partner: partner.id(),
                dragged_label: dragged.label().to_owned(),
                partner_label: partner.label().to_owned(),
                dragged_pos: dragged.position(),
                partner_pos: partner.position(),
            };
            info!(first = %pending.dragged_label, second = %pending.partner_label, "combination started");
            self.spawn_generation(pending);
            for id in [dragged.id(), partner.id()] {
                if let Some(e) = store.get_mut(&id) {
                    e.set_state(EntityState::Combining);
                }
            }
            return Release::Combining { dragged: dragged.id(), partner: partner.id() };
        }

        if bbox.overlaps(&panel_region) {
            store.remove(&dragged.id());
            info!(label = dragged.label(), "entity dropped on panel, deleted");
            return Release::Deleted(dragged.id());
        }

        if let Some(e) = store.get_mut(&dragged.id()) {
            e.set_state(EntityState::Idle);
        }
        Release::Dropped(dragged.id())
    }

    fn spawn_generation(&mut self, pending: PendingCombination) {
        self.in_flight += 1;
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        let first = pending.dragged_label.clone();
        let second = pending.partner_label.clone();

        self.runtime.spawn(async move {
            // Run the request in its own task so a panicking generator still reports back.
            let request = tokio::spawn(async move { generator.generate(&first, &second).await });
            let outcome = match request.await {
                Ok(result) => result,
                Err(err) => Err(GenerationError::Task(err.to_string())),
            };
            if tx.send(Deferred { pending, outcome }).is_err() {
                debug!("engine dropped before generation finished");
            }
        });
    }

    /// Next completed generation, without waiting.
    pub fn try_next(&mut self) -> Option<Deferred> {
        match self.rx.try_recv() {
            Ok(deferred) => Some(deferred),
            Err(_) => None,
        }
    }

    /// Wait for the next completed generation. `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<Deferred> {
        if self.in_flight == 0 {
            return None;
        }
        self.rx.recv().await
    }

    /// Apply a completed generation to the store and panel.
    pub fn apply(
        &mut self,
        deferred: Deferred,
        store: &mut EntityStore,
        panel: &mut PanelModel,
        metrics: &dyn TextMetrics,
    ) -> Resolution {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Deferred { pending, outcome } = deferred;

        if !store.contains(&pending.dragged) || !store.contains(&pending.partner) {
            unfreeze(store, &pending);
            debug!(
                first = %pending.dragged_label,
                second = %pending.partner_label,
                "parent gone before generation finished, result dropped"
            );
            return Resolution::Stale;
        }

        let label = match outcome {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
            Ok(_) => {
                unfreeze(store, &pending);
                warn!(first = %pending.dragged_label, second = %pending.partner_label, "generator returned nothing");
                return Resolution::Failed;
            }
            Err(err) => {
                unfreeze(store, &pending);
                warn!(first = %pending.dragged_label, second = %pending.partner_label, %err, "generation failed");
                return Resolution::Failed;
            }
        };

        store.remove(&pending.dragged);
        store.remove(&pending.partner);
        let child = store.add(Entity::new(label.clone(), pending.midpoint(), metrics.measure(&label)));
        let discovered = panel.add_template(&label);
        info!(
            first = %pending.dragged_label,
            second = %pending.partner_label,
            result = %label,
            discovered,
            "combination resolved"
        );
        Resolution::Merged { child, label, discovered }
    }
}

fn unfreeze(store: &mut EntityStore, pending: &PendingCombination) {
    for id in [pending.dragged, pending.partner] {
        if let Some(e) = store.get_mut(&id).filter(|e| e.is_processing()) {
            e.set_state(EntityState::Idle);
        }
    }
}
