use glam::Vec3;

use super::*;
use crate::manips::Manipulator;
use crate::render::DrawCmd;

const HIGHLIGHT: [f32; 3] = [0.8, 0.8, 0.0];

fn test_camera() -> CameraParameters {
    CameraParameters {
        position: [0.0, 0.0, 10.0],
        forward: [0.0, 0.0, -1.0],
        up: [0.0, 1.0, 0.0],
        vert_fov: std::f32::consts::FRAC_PI_4,
        aspect: 1.0,
        viewport_px: [101, 101],
    }
}

/// Window, manager and registry with one axis-translate manipulator at
/// the origin, viewed down -z from (0, 0, 10). Pixel (50, 50) is the
/// window center.
fn setup() -> (ManipManager, ManipRegistry, WindowId, ManipId) {
    let mut manager = ManipManager::default();
    let mut registry = ManipRegistry::new();
    let window = WindowId(1);
    manager.window_created(window);
    manager.update_camera_parameters(window, test_camera());
    let manip = registry.insert(Manipulator::translate_axis());
    manager.add_manip_to_window(manip, window);
    (manager, registry, window, manip)
}

fn down(manager: &mut ManipManager, registry: &mut ManipRegistry, window: WindowId, x: f32, y: f32) {
    manager.pointer_down(
        registry,
        window,
        MouseButton::Primary,
        Modifiers::default(),
        x,
        y,
    );
}

fn highlighted_triangles(
    manager: &ManipManager,
    registry: &ManipRegistry,
    window: WindowId,
) -> usize {
    let mut out = DrawList::new();
    manager.render_window(registry, window, &mut out);
    out.cmds()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCmd::Triangles { color, .. } if *color == HIGHLIGHT))
        .count()
}

#[test]
fn indices_stay_consistent_through_mixed_operations() {
    let mut manager = ManipManager::default();
    let mut registry = ManipRegistry::new();
    let w1 = WindowId(1);
    let w2 = WindowId(2);
    let a = registry.insert(Manipulator::translate_axis());
    let b = registry.insert(Manipulator::handle_box());

    manager.window_created(w1);
    manager.add_manip_to_window(a, w1);
    manager.add_manip_to_window(a, w2); // auto-creates w2
    manager.add_manip_to_window(b, w2);
    assert!(manager.indices_consistent());

    manager.remove_manip_from_window(a, w1);
    assert!(manager.indices_consistent());
    assert_eq!(manager.windows_of(a), &[w2]);

    manager.window_destroyed(w2);
    assert!(manager.indices_consistent());
    assert!(manager.windows_of(a).is_empty());
    assert!(manager.windows_of(b).is_empty());

    manager.add_manip_to_window(b, w1);
    manager.remove_manip(b);
    assert!(manager.indices_consistent());
    assert!(manager.manips_in(w1).is_empty());
}

#[test]
fn duplicate_registrations_are_reported_not_fatal() {
    let mut manager = ManipManager::default();
    let mut registry = ManipRegistry::new();
    let window = WindowId(7);
    assert!(manager.window_created(window));
    assert!(!manager.window_created(window));
    assert!(!manager.window_destroyed(WindowId(99)));

    let manip = registry.insert(Manipulator::translate_axis());
    assert!(manager.add_manip_to_window(manip, window));
    assert!(!manager.add_manip_to_window(manip, window));
    assert_eq!(manager.manips_in(window).len(), 1);
    assert!(manager.indices_consistent());

    assert!(manager.remove_manip_from_window(manip, window));
    assert!(!manager.remove_manip_from_window(manip, window));
}

#[test]
fn window_destroyed_keeps_manipulators_alive() {
    let (mut manager, registry, window, manip) = setup();
    assert!(manager.window_destroyed(window));
    assert!(registry.contains(manip));
    assert!(manager.manips_in(window).is_empty());
}

#[test]
fn camera_update_for_unknown_window_is_dropped() {
    let mut manager = ManipManager::default();
    manager.update_camera_parameters(WindowId(5), test_camera());
    assert!(manager.camera_parameters(WindowId(5)).is_none());
}

#[test]
fn pointer_down_starts_drag_and_pointer_up_ends_it() {
    let (mut manager, mut registry, window, manip) = setup();
    down(&mut manager, &mut registry, window, 50.0, 50.0);
    assert!(manager.dragging());

    // 10 px to the right bends the ray by 0.2 in normalized x.
    manager.pointer_move(&mut registry, window, 60.0, 50.0);
    let moved = registry.get(manip).unwrap().translation();
    assert!(moved.x > 0.5);
    assert!(moved.y.abs() < 1.0e-3);

    manager.pointer_up(&mut registry, window, 60.0, 50.0);
    assert!(!manager.dragging());
}

#[test]
fn only_primary_button_starts_interaction() {
    let (mut manager, mut registry, window, _manip) = setup();
    for button in [MouseButton::Secondary, MouseButton::Middle] {
        manager.pointer_down(&mut registry, window, button, Modifiers::default(), 50.0, 50.0);
        assert!(!manager.dragging());
    }
}

#[test]
fn closest_manipulator_wins_the_pick() {
    let (mut manager, mut registry, window, far) = setup();
    let near = registry.insert(Manipulator::translate_axis());
    registry
        .get_mut(near)
        .unwrap()
        .as_translate_axis_mut()
        .unwrap()
        .set_translation(Vec3::new(0.0, 0.0, 5.0));
    manager.add_manip_to_window(near, window);

    down(&mut manager, &mut registry, window, 50.0, 50.0);
    manager.pointer_move(&mut registry, window, 60.0, 50.0);
    manager.pointer_up(&mut registry, window, 60.0, 50.0);

    assert!(registry.get(near).unwrap().translation().x > 0.5);
    assert_eq!(registry.get(far).unwrap().translation(), Vec3::ZERO);
}

#[test]
fn pointer_down_with_no_hit_leaves_highlight_untouched() {
    let (mut manager, mut registry, window, _manip) = setup();
    // Hover over the manipulator first.
    manager.pointer_move(&mut registry, window, 50.0, 50.0);
    assert!(highlighted_triangles(&manager, &registry, window) > 0);

    // Press in an empty corner: no drag starts, highlight stays.
    down(&mut manager, &mut registry, window, 0.0, 0.0);
    assert!(!manager.dragging());
    assert!(highlighted_triangles(&manager, &registry, window) > 0);
}

#[test]
fn hover_highlight_clears_when_cursor_leaves() {
    let (mut manager, mut registry, window, _manip) = setup();
    manager.pointer_move(&mut registry, window, 50.0, 50.0);
    assert!(highlighted_triangles(&manager, &registry, window) > 0);
    manager.pointer_move(&mut registry, window, 0.0, 0.0);
    assert_eq!(highlighted_triangles(&manager, &registry, window), 0);
}

#[test]
fn hover_highlight_can_be_disabled() {
    let (mut manager, mut registry, window, _manip) = setup();
    manager.set_options(ManagerOptions {
        hover_highlight: false,
    });
    manager.pointer_move(&mut registry, window, 50.0, 50.0);
    assert_eq!(highlighted_triangles(&manager, &registry, window), 0);
}

#[test]
fn pointer_up_reruns_hover_at_release_point() {
    let (mut manager, mut registry, window, _manip) = setup();
    down(&mut manager, &mut registry, window, 50.0, 50.0);
    manager.pointer_up(&mut registry, window, 50.0, 50.0);
    // The cursor is still over the manipulator, so it is hover-highlighted
    // again right away.
    assert!(!manager.dragging());
    assert!(highlighted_triangles(&manager, &registry, window) > 0);
}

#[test]
fn two_windows_observe_the_same_manipulator_state() {
    let (mut manager, mut registry, w1, manip) = setup();
    let w2 = WindowId(2);
    manager.window_created(w2);
    manager.update_camera_parameters(w2, test_camera());
    manager.add_manip_to_window(manip, w2);

    down(&mut manager, &mut registry, w1, 50.0, 50.0);
    manager.pointer_move(&mut registry, w1, 60.0, 50.0);
    manager.pointer_up(&mut registry, w1, 60.0, 50.0);

    let translation = registry.get(manip).unwrap().translation();
    assert!(translation.x > 0.5);

    // Both windows render the one shared instance, not copies.
    let mut out1 = DrawList::new();
    manager.render_window(&registry, w1, &mut out1);
    let mut out2 = DrawList::new();
    manager.render_window(&registry, w2, &mut out2);
    assert_eq!(out1, out2);
    assert!(!out1.is_empty());
}

#[test]
fn removing_dragged_manipulator_cancels_the_drag() {
    let (mut manager, mut registry, window, manip) = setup();
    down(&mut manager, &mut registry, window, 50.0, 50.0);
    assert!(manager.dragging());

    manager.remove_manip(manip);
    registry.remove(manip);
    assert!(!manager.dragging());
    assert!(manager.indices_consistent());
    // Further motion is a no-op, not a crash.
    manager.pointer_move(&mut registry, window, 60.0, 50.0);
}

#[test]
fn stale_registry_ids_are_skipped() {
    let (mut manager, mut registry, window, manip) = setup();
    // Forgot to tell the manager: the id is stale but harmless.
    registry.remove(manip);
    down(&mut manager, &mut registry, window, 50.0, 50.0);
    assert!(!manager.dragging());
}

#[test]
fn render_all_visits_every_window() {
    let (mut manager, registry, w1, manip) = setup();
    let w2 = WindowId(2);
    manager.window_created(w2);
    manager.add_manip_to_window(manip, w2);

    let mut seen = Vec::new();
    manager.render_all(&registry, |window, list| {
        seen.push((window, list.len()));
    });
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&(w1, 1)));
    assert!(seen.contains(&(w2, 1)));
}

#[test]
fn render_follows_registration_order() {
    let (mut manager, mut registry, window, _first) = setup();
    let second = registry.insert(Manipulator::handle_box());
    manager.add_manip_to_window(second, window);

    let mut out = DrawList::new();
    manager.render_window(&registry, window, &mut out);
    // One triangle batch for the arrow, then the handle box output
    // (12 segments and 14 handle cubes).
    assert!(matches!(out.cmds()[0], DrawCmd::Triangles { .. }));
    assert!(matches!(out.cmds()[1], DrawCmd::Lines { .. }));
    assert_eq!(out.len(), 1 + 12 + 14);
}
