use std::collections::HashSet;

use super::*;
use crate::entity::EntityState;
use crate::geom::{Point, Size};

fn tile(label: &str) -> Entity {
    Entity::new(label, Point::new(0.0, 0.0), Size::new(40.0, 20.0))
}

fn assert_unique_z(store: &EntityStore) {
    let zs: HashSet<i64> = store.iter().map(Entity::z_order).collect();
    assert_eq!(zs.len(), store.len(), "z-order values must be unique");
}

// =============================================================
// add / remove
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = EntityStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.max_z_order().is_none());
}

#[test]
fn first_entity_gets_z_zero() {
    let mut store = EntityStore::new();
    let id = store.add(tile("Fire"));
    assert_eq!(store.get(&id).map(Entity::z_order), Some(0));
}

#[test]
fn add_allocates_increasing_z() {
    let mut store = EntityStore::new();
    let a = store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    let c = store.add(tile("Earth"));
    let z = |id| store.get(&id).map(Entity::z_order);
    assert!(z(a) < z(b));
    assert!(z(b) < z(c));
    assert_unique_z(&store);
}

#[test]
fn remove_returns_entity() {
    let mut store = EntityStore::new();
    let id = store.add(tile("Fire"));
    let removed = store.remove(&id);
    assert_eq!(removed.map(|e| e.label().to_owned()), Some("Fire".to_owned()));
    assert!(store.is_empty());
    assert!(!store.contains(&id));
}

#[test]
fn remove_unknown_is_none() {
    let mut store = EntityStore::new();
    store.add(tile("Fire"));
    assert!(store.remove(&uuid::Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_reports_count() {
    let mut store = EntityStore::new();
    store.add(tile("Fire"));
    store.add(tile("Water"));
    assert_eq!(store.clear(), 2);
    assert!(store.is_empty());
}

#[test]
fn iter_keeps_insertion_order() {
    let mut store = EntityStore::new();
    let a = store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    store.bring_to_front(&a);
    let ids: Vec<EntityId> = store.iter().map(Entity::id).collect();
    assert_eq!(ids, vec![a, b]);
}

// =============================================================
// bring_to_front
// =============================================================

#[test]
fn bring_to_front_exceeds_all_others() {
    let mut store = EntityStore::new();
    let a = store.add(tile("Fire"));
    store.add(tile("Water"));
    store.add(tile("Earth"));

    assert!(store.bring_to_front(&a));
    let za = store.get(&a).map_or(i64::MIN, Entity::z_order);
    assert!(store.iter().filter(|e| e.id() != a).all(|e| e.z_order() < za));
    assert_unique_z(&store);
}

#[test]
fn bring_to_front_on_top_entity_stays_unique() {
    let mut store = EntityStore::new();
    store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    assert!(store.bring_to_front(&b));
    assert!(store.bring_to_front(&b));
    assert_unique_z(&store);
    assert_eq!(store.ids_top_down().first(), Some(&b));
}

#[test]
fn bring_to_front_unknown_is_false() {
    let mut store = EntityStore::new();
    assert!(!store.bring_to_front(&uuid::Uuid::new_v4()));
}

#[test]
fn z_stays_unique_after_remove_then_add() {
    let mut store = EntityStore::new();
    store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    store.remove(&b);
    store.add(tile("Earth"));
    store.add(tile("Air"));
    assert_unique_z(&store);
}

// =============================================================
// ordering views
// =============================================================

#[test]
fn all_is_sorted_by_ascending_z() {
    let mut store = EntityStore::new();
    let a = store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    let c = store.add(tile("Earth"));
    store.bring_to_front(&a);
    let ids: Vec<EntityId> = store.all().into_iter().map(Entity::id).collect();
    assert_eq!(ids, vec![b, c, a]);
}

#[test]
fn ids_top_down_is_reverse_draw_order() {
    let mut store = EntityStore::new();
    let a = store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    assert_eq!(store.ids_top_down(), vec![b, a]);
}

#[test]
fn dragging_finds_the_dragged_entity() {
    let mut store = EntityStore::new();
    store.add(tile("Fire"));
    let b = store.add(tile("Water"));
    assert!(store.dragging().is_none());
    if let Some(e) = store.get_mut(&b) {
        e.set_state(EntityState::Dragging { grab: Point::new(0.0, 0.0) });
    }
    assert_eq!(store.dragging(), Some(b));
}
