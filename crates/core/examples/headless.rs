//! Drives a full pointer-down / drag / pointer-up cycle against an
//! axis-translate manipulator without any window system, logging what the
//! embedder would observe.

use gripkit::{
    CameraParameters, ManipManager, ManipRegistry, Manipulator, Modifiers, MouseButton, WindowId,
};

fn main() {
    tracing_subscriber::fmt().init();

    let mut manager = ManipManager::default();
    let mut registry = ManipRegistry::new();

    let window = WindowId(1);
    manager.window_created(window);
    manager.update_camera_parameters(
        window,
        CameraParameters {
            position: [0.0, 0.0, 10.0],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            vert_fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            viewport_px: [640, 480],
        },
    );

    let mut manip = Manipulator::translate_axis();
    manip.add_motion_callback(|event| {
        tracing::info!("dragged to {:?}", event.translation);
    });
    let id = registry.insert(manip);
    manager.add_manip_to_window(id, window);

    // Press on the manipulator at the window center, sweep right, release.
    manager.pointer_down(
        &mut registry,
        window,
        MouseButton::Primary,
        Modifiers::default(),
        320.0,
        240.0,
    );
    tracing::info!("dragging = {}", manager.dragging());
    for x in [360.0, 400.0, 440.0] {
        manager.pointer_move(&mut registry, window, x, 240.0);
    }
    manager.pointer_up(&mut registry, window, 440.0, 240.0);

    let translation = registry.get(id).map(|m| m.translation());
    tracing::info!("final translation: {:?}", translation);

    manager.render_all(&registry, |window, list| {
        tracing::info!("window {:?}: {} draw commands", window, list.len());
    });
}
