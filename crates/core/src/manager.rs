use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{pixel_to_normalized, CameraParameters, FrustumMapping, ScreenToRayMapping};
use crate::hit::HitPoint;
use crate::manips::Modifiers;
use crate::registry::{ManipId, ManipRegistry};
use crate::render::DrawList;

/// Identifies a window. The value is the embedder's: whatever id its
/// windowing layer hands out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Mouse buttons as far as the engine cares; only the primary button
/// starts interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Interaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerOptions {
    /// Hover feedback is purely cosmetic; embedders that cannot afford a
    /// hit-test per mouse move can switch it off.
    pub hover_highlight: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            hover_highlight: true,
        }
    }
}

/// Routes per-window pointer events to manipulators and drives their
/// highlight/drag lifecycle.
///
/// The manager never owns manipulators: it holds ids into a caller-owned
/// `ManipRegistry` and keeps two reverse-indexed maps, window to
/// manipulators and manipulator to windows. A (manipulator, window) pair
/// is present in one direction exactly when it is present in the other.
/// At most one manipulator is being dragged at a time, across all
/// windows, and at most one carries the hover highlight.
pub struct ManipManager {
    window_manips: BTreeMap<WindowId, Vec<ManipId>>,
    manip_windows: BTreeMap<ManipId, Vec<WindowId>>,
    cameras: BTreeMap<WindowId, CameraParameters>,
    mapping: Box<dyn ScreenToRayMapping>,
    options: ManagerOptions,
    drag_target: Option<ManipId>,
    hover_target: Option<ManipId>,
}

impl Default for ManipManager {
    fn default() -> Self {
        Self::new(ManagerOptions::default())
    }
}

impl ManipManager {
    pub fn new(options: ManagerOptions) -> Self {
        Self {
            window_manips: BTreeMap::new(),
            manip_windows: BTreeMap::new(),
            cameras: BTreeMap::new(),
            mapping: Box::new(FrustumMapping),
            options,
            drag_target: None,
            hover_target: None,
        }
    }

    pub fn options(&self) -> ManagerOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ManagerOptions) {
        self.options = options;
    }

    /// Replaces the screen-to-ray strategy (the default assumes a
    /// symmetric perspective frustum).
    pub fn set_screen_to_ray_mapping(&mut self, mapping: Box<dyn ScreenToRayMapping>) {
        self.mapping = mapping;
    }

    /// Registers a window. Returns false (with a report) when the window
    /// already exists.
    pub fn window_created(&mut self, window: WindowId) -> bool {
        if self.window_manips.contains_key(&window) {
            tracing::warn!("window {:?} was already registered", window);
            return false;
        }
        self.create_window_entry(window);
        true
    }

    /// Unregisters a window, dropping all of its manipulator associations
    /// (the manipulators themselves survive). Returns false for unknown
    /// windows.
    pub fn window_destroyed(&mut self, window: WindowId) -> bool {
        let Some(manips) = self.window_manips.remove(&window) else {
            tracing::warn!("window {:?} was never registered", window);
            return false;
        };
        self.cameras.remove(&window);
        for manip in manips {
            if let Some(windows) = self.manip_windows.get_mut(&manip) {
                windows.retain(|w| *w != window);
            }
        }
        true
    }

    /// Updates the cached camera parameters for a window. Unknown windows
    /// are a usage error; the parameters are dropped.
    pub fn update_camera_parameters(&mut self, window: WindowId, params: CameraParameters) {
        let Some(entry) = self.cameras.get_mut(&window) else {
            tracing::error!(
                "camera update for unknown window {:?}; call window_created first",
                window
            );
            return;
        };
        *entry = params;
    }

    pub fn camera_parameters(&self, window: WindowId) -> Option<&CameraParameters> {
        self.cameras.get(&window)
    }

    /// Associates a manipulator with a window, creating entries for both
    /// as needed. Returns false when the pair is already present.
    pub fn add_manip_to_window(&mut self, manip: ManipId, window: WindowId) -> bool {
        self.create_window_entry(window);
        self.manip_windows.entry(manip).or_default();
        let manips = self.window_manips.entry(window).or_default();
        if manips.contains(&manip) {
            tracing::warn!("manipulator {:?} already present in window {:?}", manip, window);
            return false;
        }
        manips.push(manip);
        let windows = self.manip_windows.entry(manip).or_default();
        windows.push(window);
        true
    }

    /// Drops one (manipulator, window) association, keeping both indices
    /// in step. Returns false when the pair was not present.
    pub fn remove_manip_from_window(&mut self, manip: ManipId, window: WindowId) -> bool {
        let Some(manips) = self.window_manips.get_mut(&window) else {
            return false;
        };
        let Some(pos) = manips.iter().position(|m| *m == manip) else {
            return false;
        };
        manips.remove(pos);
        if let Some(windows) = self.manip_windows.get_mut(&manip) {
            windows.retain(|w| *w != window);
        }
        true
    }

    /// Purges every window association of a manipulator that is going
    /// away. A manipulator removed mid-drag has its drag cancelled (with
    /// a warning) rather than left dangling.
    pub fn remove_manip(&mut self, manip: ManipId) {
        if self.drag_target == Some(manip) {
            tracing::warn!("removing manipulator {:?} while it is being dragged", manip);
            self.drag_target = None;
        }
        if self.hover_target == Some(manip) {
            self.hover_target = None;
        }
        let Some(windows) = self.manip_windows.remove(&manip) else {
            return;
        };
        for window in windows {
            if let Some(manips) = self.window_manips.get_mut(&window) {
                manips.retain(|m| *m != manip);
            }
        }
    }

    /// Windows this manipulator is shown in.
    pub fn windows_of(&self, manip: ManipId) -> &[WindowId] {
        self.manip_windows.get(&manip).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Manipulators registered to this window, in registration order.
    pub fn manips_in(&self, window: WindowId) -> &[ManipId] {
        self.window_manips.get(&window).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dragging(&self) -> bool {
        self.drag_target.is_some()
    }

    /// Pointer press at pixel coordinates in a window. Only the primary
    /// button starts interaction: the closest hit along the pick ray
    /// becomes active and starts a drag. With no hit nothing changes, not
    /// even an existing hover highlight.
    pub fn pointer_down(
        &mut self,
        registry: &mut ManipRegistry,
        window: WindowId,
        button: MouseButton,
        mods: Modifiers,
        x: f32,
        y: f32,
    ) {
        if button != MouseButton::Primary {
            return;
        }
        let Some((ray_start, ray_direction)) = self.compute_ray(window, x, y) else {
            return;
        };
        let Some(hit) = self.closest_hit(registry, window, ray_start, ray_direction) else {
            return;
        };
        if let Some(hover) = self.hover_target.take() {
            if let Some(manip) = registry.get_mut(hover) {
                manip.clear_highlight();
            }
        }
        let Some(id) = hit.manip else {
            return;
        };
        let Some(manip) = registry.get_mut(id) else {
            return;
        };
        manip.make_active(&hit, mods);
        self.drag_target = Some(id);
    }

    /// Pointer motion. Forwards to the active drag if there is one,
    /// otherwise runs hover highlighting (unless disabled).
    pub fn pointer_move(&mut self, registry: &mut ManipRegistry, window: WindowId, x: f32, y: f32) {
        if let Some(target) = self.drag_target {
            let Some((ray_start, ray_direction)) = self.compute_ray(window, x, y) else {
                return;
            };
            let Some(manip) = registry.get_mut(target) else {
                tracing::error!(
                    "active manipulator {:?} disappeared mid-drag; cancelling",
                    target
                );
                self.drag_target = None;
                return;
            };
            manip.drag(ray_start, ray_direction);
        } else if self.options.hover_highlight {
            self.update_hover(registry, window, x, y);
        }
    }

    /// Pointer release. Ends the active drag and immediately re-runs
    /// hover highlighting at the release point.
    pub fn pointer_up(&mut self, registry: &mut ManipRegistry, window: WindowId, x: f32, y: f32) {
        let Some(target) = self.drag_target.take() else {
            return;
        };
        if let Some(manip) = registry.get_mut(target) {
            manip.make_inactive();
        }
        if self.options.hover_highlight {
            self.update_hover(registry, window, x, y);
        }
    }

    /// Appends every manipulator registered to `window`, in registration
    /// order, to the draw list.
    pub fn render_window(&self, registry: &ManipRegistry, window: WindowId, out: &mut DrawList) {
        for &id in self.manips_in(window) {
            if let Some(manip) = registry.get(id) {
                manip.render(out);
            }
        }
    }

    /// Renders every window in turn. The callback receives each window's
    /// draw list, so the embedder can make the matching graphics context
    /// current before replaying it.
    pub fn render_all(
        &self,
        registry: &ManipRegistry,
        mut sink: impl FnMut(WindowId, &DrawList),
    ) {
        for &window in self.window_manips.keys() {
            let mut out = DrawList::new();
            self.render_window(registry, window, &mut out);
            sink(window, &out);
        }
    }

    fn create_window_entry(&mut self, window: WindowId) {
        self.window_manips.entry(window).or_default();
        self.cameras.entry(window).or_default();
    }

    fn compute_ray(&self, window: WindowId, x: f32, y: f32) -> Option<(Vec3, Vec3)> {
        let Some(params) = self.cameras.get(&window) else {
            tracing::error!(
                "event from unknown window {:?}; call window_created first",
                window
            );
            return None;
        };
        let screen = pixel_to_normalized(params, x, y);
        self.mapping.map_screen_to_ray(screen, params)
    }

    /// Intersects the ray against every manipulator in the window and
    /// picks the hit with the smallest ray parameter; ties keep the first
    /// hit found, so the outcome is deterministic in registration order.
    fn closest_hit(
        &self,
        registry: &ManipRegistry,
        window: WindowId,
        ray_start: Vec3,
        ray_direction: Vec3,
    ) -> Option<HitPoint> {
        let mut results = Vec::new();
        for &id in self.manips_in(window) {
            let Some(manip) = registry.get(id) else {
                tracing::warn!("stale manipulator {:?} in window {:?}", id, window);
                continue;
            };
            let top = results.len();
            manip.intersect_ray(ray_start, ray_direction, &mut results);
            for hit in &mut results[top..] {
                hit.manip = Some(id);
            }
        }
        let mut closest: Option<HitPoint> = None;
        for hit in results {
            match &closest {
                Some(best) if hit.t >= best.t => {}
                _ => closest = Some(hit),
            }
        }
        closest
    }

    fn update_hover(&mut self, registry: &mut ManipRegistry, window: WindowId, x: f32, y: f32) {
        let Some((ray_start, ray_direction)) = self.compute_ray(window, x, y) else {
            return;
        };
        let hit = self.closest_hit(registry, window, ray_start, ray_direction);
        if let Some(hover) = self.hover_target.take() {
            if let Some(manip) = registry.get_mut(hover) {
                manip.clear_highlight();
            }
        }
        let Some(hit) = hit else {
            return;
        };
        let Some(id) = hit.manip else {
            return;
        };
        if let Some(manip) = registry.get_mut(id) {
            manip.highlight(&hit);
            self.hover_target = Some(id);
        }
    }

    /// Both index directions must agree on every pair; used by tests.
    #[cfg(test)]
    pub(crate) fn indices_consistent(&self) -> bool {
        for (window, manips) in &self.window_manips {
            for manip in manips {
                let Some(windows) = self.manip_windows.get(manip) else {
                    return false;
                };
                if !windows.contains(window) {
                    return false;
                }
            }
        }
        for (manip, windows) in &self.manip_windows {
            for window in windows {
                let Some(manips) = self.window_manips.get(window) else {
                    return false;
                };
                if !manips.contains(manip) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests;
