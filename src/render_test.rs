#![allow(clippy::float_cmp)]

use std::convert::Infallible;

use super::*;
use crate::config::LayoutConfig;

// =============================================================
// Helpers
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Fill(Rect, Color),
    Stroke(Rect, Color),
    Text(String, Point, Color),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Recorder {
    fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(s, _, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    fn index_of_text(&self, text: &str) -> usize {
        self.ops
            .iter()
            .position(|op| matches!(op, Op::Text(s, _, _) if s == text))
            .unwrap()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Infallible> {
        self.ops.push(Op::Fill(rect, color));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _thickness: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Stroke(rect, color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Color,
        _background: Option<Color>,
    ) -> Result<(), Infallible> {
        self.ops.push(Op::Text(text.to_owned(), origin, color));
        Ok(())
    }
}

struct Failing;

impl Surface for Failing {
    type Error = &'static str;

    fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), &'static str> {
        Err("lost context")
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _thickness: f64) -> Result<(), &'static str> {
        Err("lost context")
    }

    fn draw_text(&mut self, _: &str, _: Point, _: Color, _: Option<Color>) -> Result<(), &'static str> {
        Err("lost context")
    }
}

fn metrics() -> MonospaceMetrics {
    MonospaceMetrics::default()
}

fn tile(label: &str, x: f64, y: f64) -> Entity {
    Entity::new(label, Point::new(x, y), metrics().measure(label))
}

fn panel(labels: &[&str]) -> PanelModel {
    let labels: Vec<String> = labels.iter().map(|s| (*s).to_owned()).collect();
    PanelModel::new(&LayoutConfig::default(), &labels)
}

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn clear_button() -> ChromeButton {
    ChromeButton::new("Clear", Point::new(10.0, 10.0), (10.0, 5.0), &metrics())
}

// =============================================================
// Metrics and chrome
// =============================================================

#[test]
fn monospace_counts_chars_not_bytes() {
    let m = metrics();
    assert_eq!(m.measure("Fire"), Size::new(48.0, 24.0));
    assert_eq!(m.measure("💨"), Size::new(12.0, 24.0));
}

#[test]
fn chrome_button_wraps_label_with_padding() {
    let button = clear_button();
    assert_eq!(button.rect(), Rect::new(0.0, 5.0, 80.0, 34.0));
    assert!(button.contains(Point::new(5.0, 20.0)));
    assert!(!button.contains(Point::new(85.0, 20.0)));
}

// =============================================================
// Layering
// =============================================================

#[test]
fn backdrop_is_drawn_first() {
    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &EntityStore::new(), &panel(&["Fire"]), &[]).unwrap();
    assert_eq!(rec.ops.first(), Some(&Op::Fill(viewport(), BACKDROP)));
}

#[test]
fn panel_under_entities_under_chrome() {
    let mut store = EntityStore::new();
    store.add(tile("Steam", 100.0, 100.0));
    let button = clear_button();

    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &store, &panel(&["Fire"]), &[&button]).unwrap();

    let panel_row = rec.index_of_text("Fire");
    let entity = rec.index_of_text("Steam");
    let chrome = rec.index_of_text("Clear");
    assert!(panel_row < entity);
    assert!(entity < chrome);
}

#[test]
fn entities_drawn_in_ascending_z() {
    let mut store = EntityStore::new();
    let a = store.add(tile("A", 0.0, 0.0));
    store.add(tile("B", 50.0, 0.0));
    store.add(tile("C", 100.0, 0.0));
    store.bring_to_front(&a);

    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &store, &panel(&["Fire"]), &[]).unwrap();
    assert_eq!(rec.texts(), vec!["Fire", "B", "C", "A"]);
}

#[test]
fn entity_draws_box_text_and_outline() {
    let mut store = EntityStore::new();
    let e = tile("Mud", 100.0, 100.0);
    let bbox = e.bounding_box();
    store.add(e);

    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &store, &panel(&["Fire"]), &[]).unwrap();
    let tail = &rec.ops[rec.ops.len() - 3..];
    assert_eq!(tail[0], Op::Fill(bbox, TILE_FILL));
    assert_eq!(tail[1], Op::Text("Mud".into(), Point::new(100.0, 100.0), TILE_TEXT));
    assert_eq!(tail[2], Op::Stroke(bbox, TILE_TEXT));
}

#[test]
fn processing_entity_is_greyed() {
    let mut store = EntityStore::new();
    let id = store.add(tile("Mud", 100.0, 100.0));
    if let Some(e) = store.get_mut(&id) {
        e.set_state(crate::entity::EntityState::Combining);
    }

    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &store, &panel(&["Fire"]), &[]).unwrap();
    assert!(rec.ops.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == TILE_FILL_PROCESSING)));
    assert!(rec.ops.iter().any(|op| matches!(op, Op::Text(s, _, c) if s == "Mud" && *c == TILE_TEXT_PROCESSING)));
}

#[test]
fn scrollbar_only_when_scrollable() {
    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &EntityStore::new(), &panel(&["Fire"]), &[]).unwrap();
    assert!(!rec.ops.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == SCROLL_HANDLE)));

    let names: Vec<String> = (0..40).map(|i| format!("Item {i}")).collect();
    let tall = PanelModel::new(&LayoutConfig::default(), &names);
    let mut rec = Recorder::default();
    draw(&mut rec, viewport(), &EntityStore::new(), &tall, &[]).unwrap();
    assert!(rec.ops.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == SCROLL_TRACK)));
    assert!(rec.ops.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == SCROLL_HANDLE)));
}

#[test]
fn surface_error_propagates() {
    let result = draw(&mut Failing, viewport(), &EntityStore::new(), &panel(&["Fire"]), &[]);
    assert_eq!(result, Err("lost context"));
}
