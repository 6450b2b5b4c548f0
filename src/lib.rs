//! Alchemy: a drag-and-combine canvas engine.
//!
//! Labeled tiles are dragged from a side panel onto a canvas. Dropping one
//! tile onto another asks a generator (an LLM in production) for a new label,
//! and once the answer arrives the pair is replaced by a single new tile.
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | points, sizes, rectangles |
//! | [`entity`] | one draggable tile and its interaction state |
//! | [`store`] | live tiles, z-order authority |
//! | [`panel`] | template catalogue, scrolling, scrollbar |
//! | [`input`] | host input events |
//! | [`drag`] | press and move handling |
//! | [`combine`] | collisions, generation requests, deferred merges |
//! | [`engine`] | event routing and the per-tick loop |
//! | [`render`] | draw order over host-supplied primitives |
//! | [`generator`] | the label generator seam |
//! | [`llm`] | `OpenAI` / Anthropic chat clients |
//! | [`config`] | environment-driven layout configuration |

pub mod combine;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod entity;
pub mod generator;
pub mod geom;
pub mod input;
pub mod llm;
pub mod panel;
pub mod render;
pub mod store;

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
