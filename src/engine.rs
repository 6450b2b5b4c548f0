//! Engine: owns all mutable state and routes input through it once per tick.
//!
//! DESIGN
//! ======
//! The host calls [`Engine::handle_event`] for each input event, then
//! [`Engine::update`], then [`Engine::render`]; [`Engine::tick`] runs the
//! same sequence with the deferred queue drained first. Every mutation of
//! the store, the panel, and its scroll state happens through `&mut Engine`,
//! so generation tasks (which only hold the generator and two labels) can
//! never race the loop.
//!
//! Pointer-down routing, first claim wins:
//! 1. panel scrollbar
//! 2. entities, topmost first (drag controller); a press during a drag stops here
//! 3. global actions: the clear button, then a click on a panel row spawns that template
//!
//! Only the primary button interacts. Entities have no per-tick behavior of
//! their own, so `update` is just the deferred drain.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tracing::info;

use crate::combine::{CombinationCoordinator, Release, Resolution};
use crate::config::{EngineConfig, LayoutConfig};
use crate::consts::{CLEAR_LABEL, CLEAR_ORIGIN, CLEAR_PADDING, SPAWN_EDGE_RESERVE};
use crate::drag::{self, Press};
use crate::entity::{Entity, EntityId};
use crate::generator::Generator;
use crate::geom::{Point, Rect};
use crate::input::{Button, InputEvent};
use crate::panel::PanelModel;
use crate::render::{self, ChromeButton, Surface, TextMetrics};
use crate::store::EntityStore;

/// What a single input event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing claimed the event.
    None,
    /// The host asked to quit.
    Quit,
    /// The panel consumed the event (wheel or scrollbar gesture).
    PanelScrolled,
    DragStarted(EntityId),
    DragMoved(EntityId),
    /// The press landed on an entity waiting on a combination.
    Blocked(EntityId),
    Released(Release),
    /// A template was copied onto the canvas.
    Spawned(EntityId),
    CanvasCleared { removed: usize },
}

/// Everything that happened during one [`Engine::tick`].
#[derive(Debug, Default)]
pub struct TickReport {
    pub resolutions: Vec<Resolution>,
    pub actions: Vec<Action>,
}

impl TickReport {
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.actions.contains(&Action::Quit)
    }
}

/// The interaction and coordination engine.
pub struct Engine {
    store: EntityStore,
    panel: PanelModel,
    layout: LayoutConfig,
    clear_button: ChromeButton,
    coordinator: CombinationCoordinator,
    metrics: Box<dyn TextMetrics>,
    rng: StdRng,
}

impl Engine {
    /// Build an engine with an empty canvas and the configured seed catalogue.
    /// Generation requests run on `runtime`; the engine itself may live on any thread.
    #[must_use]
    pub fn new(
        config: &EngineConfig,
        generator: Arc<dyn Generator>,
        metrics: Box<dyn TextMetrics>,
        runtime: Handle,
    ) -> Self {
        let clear_button = ChromeButton::new(
            CLEAR_LABEL,
            Point::new(CLEAR_ORIGIN.0, CLEAR_ORIGIN.1),
            CLEAR_PADDING,
            metrics.as_ref(),
        );
        Self {
            store: EntityStore::new(),
            panel: PanelModel::new(&config.layout, &config.seed_labels),
            layout: config.layout,
            clear_button,
            coordinator: CombinationCoordinator::new(generator, runtime),
            metrics,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for spawn positions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub fn panel(&self) -> &PanelModel {
        &self.panel
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    #[must_use]
    pub fn clear_button(&self) -> &ChromeButton {
        &self.clear_button
    }

    /// Combinations still waiting on the generator.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.coordinator.in_flight()
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> Action {
        match event {
            InputEvent::Quit => Action::Quit,
            InputEvent::Wheel { delta } => {
                if self.panel.on_wheel(delta) {
                    Action::PanelScrolled
                } else {
                    Action::None
                }
            }
            InputEvent::PointerDown { pos, button: Button::Primary } => self.pointer_down(pos),
            InputEvent::PointerMove { pos } => {
                if self.panel.on_pointer_move(pos) {
                    return Action::PanelScrolled;
                }
                drag::drag_to(&mut self.store, pos).map_or(Action::None, Action::DragMoved)
            }
            InputEvent::PointerUp { pos, button: Button::Primary } => {
                if self.panel.on_pointer_up() {
                    return Action::PanelScrolled;
                }
                drag::drag_to(&mut self.store, pos);
                match self.coordinator.release(&mut self.store, self.panel.region()) {
                    Release::NotDragging => Action::None,
                    release => Action::Released(release),
                }
            }
            InputEvent::PointerDown { .. } | InputEvent::PointerUp { .. } => Action::None,
        }
    }

    fn pointer_down(&mut self, pos: Point) -> Action {
        if self.panel.on_pointer_down(pos) {
            return Action::PanelScrolled;
        }
        match drag::press(&mut self.store, pos) {
            Press::Started(id) => return Action::DragStarted(id),
            Press::Blocked(id) => return Action::Blocked(id),
            Press::Busy(_) => return Action::None,
            Press::Missed => {}
        }
        if self.clear_button.contains(pos) {
            return Action::CanvasCleared { removed: self.clear_canvas() };
        }
        if let Some(label) = self.panel.hit_test(pos).map(|t| t.label().to_owned()) {
            return Action::Spawned(self.spawn_template(&label));
        }
        Action::None
    }

    /// Apply every generation result that has arrived, without waiting.
    pub fn update(&mut self) -> Vec<Resolution> {
        let mut resolutions = Vec::new();
        while let Some(deferred) = self.coordinator.try_next() {
            resolutions.push(self.coordinator.apply(
                deferred,
                &mut self.store,
                &mut self.panel,
                self.metrics.as_ref(),
            ));
        }
        resolutions
    }

    /// Wait for the next generation result and apply it. `None` when nothing is in flight.
    pub async fn wait_deferred(&mut self) -> Option<Resolution> {
        let deferred = self.coordinator.next().await?;
        Some(self.coordinator.apply(deferred, &mut self.store, &mut self.panel, self.metrics.as_ref()))
    }

    /// Draw the scene: panel, entities by ascending z, then the clear button.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `surface`.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let viewport = Rect::new(0.0, 0.0, self.layout.window_width, self.layout.window_height);
        render::draw(surface, viewport, &self.store, &self.panel, &[&self.clear_button])
    }

    /// One loop iteration: drain deferred results, route `events`, render.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `surface`. Input has already been
    /// applied by then.
    pub fn tick<S, I>(&mut self, events: I, surface: &mut S) -> Result<TickReport, S::Error>
    where
        S: Surface,
        I: IntoIterator<Item = InputEvent>,
    {
        let resolutions = self.update();
        let actions = events.into_iter().map(|event| self.handle_event(event)).collect();
        self.render(surface)?;
        Ok(TickReport { resolutions, actions })
    }

    /// Put a new entity labeled `label` at `pos`, in front of everything else.
    pub fn spawn_at(&mut self, label: &str, pos: Point) -> EntityId {
        let id = self.store.add(Entity::new(label, pos, self.metrics.measure(label)));
        info!(label, x = pos.x, y = pos.y, "entity spawned");
        id
    }

    /// Copy a template onto a random spot of the canvas.
    pub fn spawn_template(&mut self, label: &str) -> EntityId {
        let max_x = (self.layout.canvas_width() - SPAWN_EDGE_RESERVE).max(0.0);
        let max_y = (self.layout.window_height - SPAWN_EDGE_RESERVE).max(0.0);
        let pos = Point::new(self.rng.random_range(0.0..=max_x), self.rng.random_range(0.0..=max_y));
        self.spawn_at(label, pos)
    }

    /// Remove every canvas entity. In-flight combinations resolve as stale.
    pub fn clear_canvas(&mut self) -> usize {
        let removed = self.store.clear();
        info!(removed, in_flight = self.coordinator.in_flight(), "canvas cleared");
        removed
    }
}
