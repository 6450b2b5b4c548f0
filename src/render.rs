//! Rendering: draws the full scene through host-supplied primitives.
//!
//! This module is the only place that talks to a [`Surface`]. It receives
//! read-only views of the store and panel and produces draw calls; it never
//! mutates engine state.
//!
//! Layers, bottom to top:
//! 1. backdrop
//! 2. side panel (background, visible template rows, scrollbar)
//! 3. entities in ascending z-order, so the most recently focused is drawn last
//! 4. chrome (the clear button)
//!
//! All fallible surface calls propagate the surface's own error type. The
//! top-level caller ([`crate::engine::Engine::render`]) hands the result back
//! to the host.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::entity::Entity;
use crate::geom::{Point, Rect, Size};
use crate::panel::PanelModel;
use crate::store::EntityStore;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BACKDROP: Color = Color::rgb(0, 0, 0);
pub const PANEL_FILL: Color = Color::rgb(240, 240, 240);
pub const PANEL_TEXT: Color = Color::rgb(0, 0, 0);
pub const SCROLL_TRACK: Color = Color::rgb(200, 200, 200);
pub const SCROLL_HANDLE: Color = Color::rgb(150, 150, 150);
pub const TILE_TEXT: Color = Color::rgb(0, 0, 0);
pub const TILE_FILL: Color = Color::rgb(255, 255, 255);
pub const TILE_TEXT_PROCESSING: Color = Color::rgb(200, 200, 200);
pub const TILE_FILL_PROCESSING: Color = Color::rgb(220, 220, 220);
pub const BUTTON_TEXT: Color = Color::rgb(0, 0, 0);
pub const BUTTON_FILL: Color = Color::rgb(200, 200, 200);

/// Measures rendered text. The engine only needs extents to size bounding boxes.
pub trait TextMetrics {
    fn measure(&self, text: &str) -> Size;
}

/// Fixed-advance text measurement, for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { char_width: 12.0, line_height: 24.0 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str) -> Size {
        #[allow(clippy::cast_precision_loss)]
        let chars = text.chars().count() as f64;
        Size::new(chars * self.char_width, self.line_height)
    }
}

/// Drawing primitives supplied by the host.
pub trait Surface {
    type Error;

    /// Fill `rect` with a solid color.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;

    /// Outline `rect` with a line `thickness` pixels wide.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f64) -> Result<(), Self::Error>;

    /// Render `text` with its top-left corner at `origin`, optionally on a solid background.
    ///
    /// # Errors
    ///
    /// Backend-specific.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color, background: Option<Color>)
    -> Result<(), Self::Error>;
}

/// A labeled button drawn above everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeButton {
    label: String,
    rect: Rect,
    padding: (f64, f64),
}

impl ChromeButton {
    /// Size the button around its measured label.
    #[must_use]
    pub fn new(label: &str, origin: Point, padding: (f64, f64), metrics: &dyn TextMetrics) -> Self {
        let rect = Rect::at(origin, metrics.measure(label)).inflate(padding.0, padding.1);
        Self { label: label.to_owned(), rect, padding }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw<S: Surface>(
    surface: &mut S,
    viewport: Rect,
    store: &EntityStore,
    panel: &PanelModel,
    chrome: &[&ChromeButton],
) -> Result<(), S::Error> {
    surface.fill_rect(viewport, BACKDROP)?;

    draw_panel(surface, panel)?;

    for entity in store.all() {
        draw_entity(surface, entity)?;
    }

    for button in chrome {
        draw_button(surface, button)?;
    }

    Ok(())
}

fn draw_panel<S: Surface>(surface: &mut S, panel: &PanelModel) -> Result<(), S::Error> {
    surface.fill_rect(panel.region(), PANEL_FILL)?;

    for (template, row) in panel.visible_rows() {
        surface.draw_text(template.label(), row.origin(), PANEL_TEXT, None)?;
    }

    // Only shown once the rows outgrow the panel.
    if let Some(handle) = panel.handle_rect() {
        surface.fill_rect(panel.scrollbar_rect(), SCROLL_TRACK)?;
        surface.fill_rect(handle, SCROLL_HANDLE)?;
    }
    Ok(())
}

fn draw_entity<S: Surface>(surface: &mut S, entity: &Entity) -> Result<(), S::Error> {
    let (text, fill) = if entity.is_processing() {
        (TILE_TEXT_PROCESSING, TILE_FILL_PROCESSING)
    } else {
        (TILE_TEXT, TILE_FILL)
    };
    let bbox = entity.bounding_box();
    surface.fill_rect(bbox, fill)?;
    surface.draw_text(entity.label(), entity.position(), text, Some(fill))?;
    surface.stroke_rect(bbox, text, 1.0)
}

fn draw_button<S: Surface>(surface: &mut S, button: &ChromeButton) -> Result<(), S::Error> {
    let rect = button.rect();
    surface.fill_rect(rect, BUTTON_FILL)?;
    let origin = Point::new(rect.x + button.padding.0, rect.y + button.padding.1);
    surface.draw_text(button.label(), origin, BUTTON_TEXT, None)
}
