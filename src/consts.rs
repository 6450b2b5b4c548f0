//! Shared numeric constants for the engine.

// ── Tiles ───────────────────────────────────────────────────────

/// Padding between a tile's label and its bounding box, on every side.
pub const TILE_MARGIN: f64 = 10.0;

// ── Panel ───────────────────────────────────────────────────────

/// Inset of the template rows from the panel's top and left edges.
pub const PANEL_ROW_INSET: f64 = 10.0;

/// Smallest scrollbar handle height, so a very long catalogue stays grabbable.
pub const MIN_SCROLL_HANDLE: f64 = 20.0;

// ── Spawning ────────────────────────────────────────────────────

/// Spawned tiles keep at least this much room to the canvas' right and bottom edges.
pub const SPAWN_EDGE_RESERVE: f64 = 100.0;

// ── Chrome ──────────────────────────────────────────────────────

/// Label of the always-on-top clear button.
pub const CLEAR_LABEL: &str = "Clear";

/// Top-left corner of the clear button.
pub const CLEAR_ORIGIN: (f64, f64) = (10.0, 10.0);

/// Horizontal and vertical padding around the clear button's label.
pub const CLEAR_PADDING: (f64, f64) = (10.0, 5.0);
