#![allow(clippy::float_cmp)]

use std::sync::PoisonError;

use super::*;
use crate::ENV_LOCK;

const KEYS: &[&str] = &[
    "ALCHEMY_WINDOW_WIDTH",
    "ALCHEMY_WINDOW_HEIGHT",
    "ALCHEMY_PANEL_WIDTH",
    "ALCHEMY_ROW_HEIGHT",
    "ALCHEMY_SCROLLBAR_WIDTH",
    "ALCHEMY_WHEEL_STEP",
    "ALCHEMY_SEED_LABELS",
];

/// # Safety
/// Callers hold `ENV_LOCK` so no other test touches the environment concurrently.
unsafe fn clear_alchemy_env() {
    for key in KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe { clear_alchemy_env() };

    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.seed_labels, vec!["Fire", "Water", "Earth", "Air"]);
    assert_eq!(cfg.layout.window_width, 800.0);
    assert_eq!(cfg.layout.panel_width, 200.0);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe {
        clear_alchemy_env();
        std::env::set_var("ALCHEMY_WINDOW_WIDTH", "1024");
        std::env::set_var("ALCHEMY_WINDOW_HEIGHT", " 768 ");
        std::env::set_var("ALCHEMY_ROW_HEIGHT", "24");
        std::env::set_var("ALCHEMY_SEED_LABELS", " Stone , ,Wind,");
    }

    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.layout.window_width, 1024.0);
    assert_eq!(cfg.layout.window_height, 768.0);
    assert_eq!(cfg.layout.row_height, 24.0);
    assert_eq!(cfg.seed_labels, vec!["Stone", "Wind"]);

    unsafe { clear_alchemy_env() };
}

#[test]
fn from_env_bad_number_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe {
        clear_alchemy_env();
        std::env::set_var("ALCHEMY_PANEL_WIDTH", "wide");
    }

    let cfg = EngineConfig::from_env().unwrap();
    assert_eq!(cfg.layout.panel_width, DEFAULT_PANEL_WIDTH);

    unsafe { clear_alchemy_env() };
}

#[test]
fn from_env_rejects_negative_geometry() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe {
        clear_alchemy_env();
        std::env::set_var("ALCHEMY_ROW_HEIGHT", "-4");
    }

    let err = EngineConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("ALCHEMY_ROW_HEIGHT"));

    unsafe { clear_alchemy_env() };
}

#[test]
fn from_env_rejects_empty_seed_list() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    unsafe {
        clear_alchemy_env();
        std::env::set_var("ALCHEMY_SEED_LABELS", " , ");
    }

    assert!(matches!(EngineConfig::from_env(), Err(ConfigError::NoSeedLabels)));

    unsafe { clear_alchemy_env() };
}

#[test]
fn validate_rejects_panel_wider_than_window() {
    let layout = LayoutConfig { panel_width: 900.0, ..LayoutConfig::default() };
    assert!(matches!(layout.validate(), Err(ConfigError::PanelTooWide { .. })));
}

#[test]
fn panel_rect_hugs_right_edge() {
    let layout = LayoutConfig::default();
    assert_eq!(layout.panel_rect(), Rect::new(600.0, 0.0, 200.0, 600.0));
    assert_eq!(layout.canvas_width(), 600.0);
}
