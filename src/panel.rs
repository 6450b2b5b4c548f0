//! Side panel: the template catalogue, its scroll state, and the scrollbar gesture.
//!
//! The panel is the full-height strip on the right of the window. Templates are
//! listed one per row, top to bottom, offset by the scroll position. Once the
//! rows outgrow the panel a scrollbar appears on its right edge. The wheel and
//! a scrollbar drag both move the offset, always clamped to
//! `0 ..= max(0, content_height - viewport_height)`.
//!
//! The catalogue only grows. A label is added when its normalised form (trimmed,
//! inner whitespace collapsed, case-folded) is not already present; the first
//! spelling seen is the one kept.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use crate::config::LayoutConfig;
use crate::consts::{MIN_SCROLL_HANDLE, PANEL_ROW_INSET};
use crate::geom::{Point, Rect};

/// A catalogue entry that can be spawned onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    label: String,
}

impl Template {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Vertical scroll position of the template list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offset: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    /// Largest offset that still keeps the viewport inside the content.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Whether the content is taller than the viewport.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Scrollbar handle height: proportional to the visible fraction, never below the minimum.
    #[must_use]
    pub fn handle_height(&self) -> f64 {
        if self.content_height <= 0.0 {
            return self.viewport_height;
        }
        (self.viewport_height * self.viewport_height / self.content_height).max(MIN_SCROLL_HANDLE)
    }

    fn scroll_by(&mut self, delta: f64) {
        self.offset += delta;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScrollbarGesture {
    Idle,
    Dragging { last_y: f64 },
}

/// The side panel model.
#[derive(Debug, Clone)]
pub struct PanelModel {
    region: Rect,
    row_height: f64,
    scrollbar_width: f64,
    wheel_step: f64,
    templates: Vec<Template>,
    scroll: ScrollState,
    gesture: ScrollbarGesture,
}

impl PanelModel {
    /// Build the panel for `layout`, seeded with `labels` (duplicates are skipped).
    #[must_use]
    pub fn new(layout: &LayoutConfig, labels: &[String]) -> Self {
        let region = layout.panel_rect();
        let mut panel = Self {
            region,
            row_height: layout.row_height,
            scrollbar_width: layout.scrollbar_width,
            wheel_step: layout.wheel_step,
            templates: Vec::new(),
            scroll: ScrollState { offset: 0.0, content_height: 0.0, viewport_height: region.height },
            gesture: ScrollbarGesture::Idle,
        };
        for label in labels {
            panel.add_template(label);
        }
        panel
    }

    /// Screen rectangle covered by the panel.
    #[must_use]
    pub fn region(&self) -> Rect {
        self.region
    }

    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    #[must_use]
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    /// Whether the scrollbar is currently being dragged.
    #[must_use]
    pub fn is_dragging_scrollbar(&self) -> bool {
        matches!(self.gesture, ScrollbarGesture::Dragging { .. })
    }

    /// Append `label` unless an equivalent label is already listed. Returns true if it was added.
    pub fn add_template(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.has_template(label) {
            return false;
        }
        self.templates.push(Template { label: label.to_owned() });
        #[allow(clippy::cast_precision_loss)]
        let rows = self.templates.len() as f64;
        self.scroll.content_height = rows * self.row_height;
        self.scroll.clamp();
        true
    }

    /// Whether a label equivalent to `label` is already in the catalogue.
    #[must_use]
    pub fn has_template(&self, label: &str) -> bool {
        let key = label_key(label);
        self.templates.iter().any(|t| label_key(&t.label) == key)
    }

    /// Screen rectangle of the template row at `index`, after scrolling.
    #[must_use]
    pub fn row_rect(&self, index: usize) -> Rect {
        #[allow(clippy::cast_precision_loss)]
        let top = self.region.y + PANEL_ROW_INSET + index as f64 * self.row_height - self.scroll.offset;
        Rect::new(self.region.x + PANEL_ROW_INSET, top, self.region.width - PANEL_ROW_INSET * 2.0, self.row_height)
    }

    /// Rows that intersect the panel, with their screen rectangles.
    pub fn visible_rows(&self) -> impl Iterator<Item = (&Template, Rect)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t, self.row_rect(i)))
            .filter(|(_, rect)| rect.overlaps(&self.region))
    }

    /// The template whose row is under `pt`, accounting for the scroll offset.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<&Template> {
        if !self.region.contains(pt) {
            return None;
        }
        let content_y = pt.y - self.region.y - PANEL_ROW_INSET + self.scroll.offset;
        if content_y < 0.0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (content_y / self.row_height).floor() as usize;
        let template = self.templates.get(index)?;
        self.row_rect(index).contains(pt).then_some(template)
    }

    /// Scrollbar track along the panel's right edge.
    #[must_use]
    pub fn scrollbar_rect(&self) -> Rect {
        Rect::new(self.region.right() - self.scrollbar_width, self.region.y, self.scrollbar_width, self.region.height)
    }

    /// Scrollbar handle, or `None` when the content fits and no scrollbar is shown.
    #[must_use]
    pub fn handle_rect(&self) -> Option<Rect> {
        if !self.scroll.is_scrollable() {
            return None;
        }
        let track = self.scrollbar_rect();
        let handle_h = self.scroll.handle_height();
        let travel = (track.height - handle_h).max(0.0);
        let y = self.scroll.offset * travel / self.scroll.max_offset();
        Some(Rect::new(track.x, track.y + y, track.width, handle_h))
    }

    /// Scroll by `delta` wheel notches (positive scrolls up). Returns true if the panel claimed the event.
    pub fn on_wheel(&mut self, delta: f64) -> bool {
        if !self.scroll.is_scrollable() {
            return false;
        }
        self.scroll.scroll_by(-delta * self.wheel_step);
        true
    }

    /// Move the handle by `delta_pixels` along the track, translated into content pixels.
    pub fn on_scrollbar_drag(&mut self, delta_pixels: f64) {
        let travel = self.scroll.viewport_height - self.scroll.handle_height();
        if travel <= 0.0 {
            return;
        }
        self.scroll.scroll_by(delta_pixels * self.scroll.max_offset() / travel);
    }

    /// Start a scrollbar drag if `pt` is on a visible scrollbar. Returns true if claimed.
    pub fn on_pointer_down(&mut self, pt: Point) -> bool {
        if !self.scroll.is_scrollable() || !self.scrollbar_rect().contains(pt) {
            return false;
        }
        self.gesture = ScrollbarGesture::Dragging { last_y: pt.y };
        true
    }

    /// Continue a scrollbar drag. Returns true if claimed.
    pub fn on_pointer_move(&mut self, pt: Point) -> bool {
        let ScrollbarGesture::Dragging { last_y } = self.gesture else {
            return false;
        };
        self.gesture = ScrollbarGesture::Dragging { last_y: pt.y };
        self.on_scrollbar_drag(pt.y - last_y);
        true
    }

    /// Finish a scrollbar drag. Returns true if claimed.
    pub fn on_pointer_up(&mut self) -> bool {
        if self.gesture == ScrollbarGesture::Idle {
            return false;
        }
        self.gesture = ScrollbarGesture::Idle;
        true
    }
}

fn label_key(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
