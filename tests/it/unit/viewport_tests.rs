//! Unit tests for the viewport manager.

use sitecanvas::constants::{MAX_ZOOM, MIN_ZOOM};
use sitecanvas::geometry::{Point, Rect};
use sitecanvas::viewport::{ViewportManager, snap_to_grid};

const EPS: f32 = 1e-3;

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

fn manager() -> ViewportManager {
    let mut manager = ViewportManager::new();
    manager.register_canvas_rect(Rect::new(0.0, 0.0, 820.0, 620.0));
    manager
}

#[test]
fn test_zoom_keeps_point_under_cursor() {
    let mut manager = manager();
    let before = manager.screen_to_canvas(50.0, 50.0);
    assert!(manager.zoom(0.1, Some(Point::new(50.0, 50.0))));
    let after = manager.screen_to_canvas(50.0, 50.0);
    assert!(approx(before, after), "{before:?} vs {after:?}");
}

#[test]
fn test_zoom_anchor_holds_at_offset_origin() {
    let mut manager = ViewportManager::new();
    manager.register_canvas_rect(Rect::new(300.0, 120.0, 820.0, 620.0));
    manager.pan(35.0, -12.0);
    let center = Point::new(640.0, 410.0);
    let before = manager.screen_to_canvas(center.x, center.y);
    manager.zoom(0.75, Some(center));
    assert!(approx(before, manager.screen_to_canvas(center.x, center.y)));
}

#[test]
fn test_zoom_clamps_and_zero_delta_is_noop() {
    let mut manager = manager();
    assert!(!manager.zoom(0.0, None));
    manager.zoom(100.0, None);
    assert_eq!(manager.zoom_level(), MAX_ZOOM);
    manager.zoom(-100.0, None);
    assert_eq!(manager.zoom_level(), MIN_ZOOM);
    assert!(!manager.zoom(-0.5, None));
}

#[test]
fn test_pan_is_unbounded() {
    let mut manager = manager();
    manager.pan(-100_000.0, 250.0);
    let viewport = manager.viewport();
    assert_eq!((viewport.x, viewport.y), (-100_000.0, 250.0));
}

#[test]
fn test_conversion_subtracts_origin_and_ruler() {
    let mut manager = ViewportManager::new();
    manager.register_canvas_rect(Rect::new(100.0, 50.0, 800.0, 600.0));
    assert_eq!(manager.screen_to_canvas(120.0, 70.0), Point::ZERO);
}

#[test]
fn test_canvas_to_screen_inverts() {
    let mut manager = manager();
    manager.pan(13.0, -7.0);
    manager.zoom(0.6, Some(Point::new(200.0, 100.0)));
    let canvas = Point::new(42.0, -17.5);
    let screen = manager.canvas_to_screen(canvas);
    assert!(approx(manager.screen_to_canvas(screen.x, screen.y), canvas));
}

#[test]
fn test_unregistered_rect_degrades_to_origin() {
    let manager = ViewportManager::new();
    assert!(!manager.is_canvas_registered());
    assert_eq!(manager.screen_to_canvas(400.0, 300.0), Point::ZERO);
    assert_eq!(manager.canvas_to_screen(Point::new(5.0, 5.0)), Point::ZERO);
}

#[test]
fn test_snap_to_grid() {
    assert_eq!(snap_to_grid(Point::new(10.0, 37.0), 24.0), Point::new(0.0, 48.0));
    assert_eq!(snap_to_grid(Point::new(34.0, 12.0), 24.0), Point::new(24.0, 24.0));
    assert_eq!(snap_to_grid(Point::new(10.0, 37.0), 0.0), Point::new(10.0, 37.0));
    assert_eq!(snap_to_grid(Point::new(10.0, 37.0), -8.0), Point::new(10.0, 37.0));
}

#[test]
fn test_fit_to_content_centers_bounds() {
    // 820x620 rect minus 20px rulers -> 800x600 visible
    let mut manager = manager();
    manager.fit_to_content(Rect::new(0.0, 0.0, 400.0, 200.0), 40.0);
    let viewport = manager.viewport();
    assert!((viewport.zoom - 1.8).abs() < EPS);
    assert!((viewport.x - 40.0).abs() < EPS);
    assert!((viewport.y - 120.0).abs() < EPS);
}

#[test]
fn test_fit_to_content_respects_zoom_limits() {
    let mut manager = manager();
    manager.fit_to_content(Rect::new(0.0, 0.0, 2.0, 2.0), 40.0);
    assert_eq!(manager.zoom_level(), MAX_ZOOM);
    manager.fit_to_content(Rect::new(0.0, 0.0, 1_000_000.0, 10.0), 40.0);
    assert_eq!(manager.zoom_level(), MIN_ZOOM);
}

#[test]
fn test_zoom_steps_and_reset() {
    let mut manager = manager();
    manager.zoom_in();
    assert!((manager.zoom_level() - 1.1).abs() < EPS);
    manager.pan(10.0, 10.0);
    manager.reset_zoom();
    assert_eq!(manager.zoom_level(), 1.0);
    assert_eq!(manager.viewport().x, 10.0);
    manager.reset();
    assert_eq!((manager.viewport().x, manager.viewport().y), (0.0, 0.0));
}
