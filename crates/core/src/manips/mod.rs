mod handle_box;
mod translate_axis;
mod translate_plane;

pub use handle_box::HandleBox;
pub use translate_axis::TranslateAxis;
pub use translate_plane::TranslatePlane;

use glam::{Quat, Vec3};

use crate::hit::HitPoint;
use crate::render::DrawList;

/// Keyboard modifier state at the moment a drag starts. The embedder
/// samples this from its input layer and passes it through with the
/// pointer-down event; the handle box uses shift to switch its corner
/// handles from uniform to single-axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

/// Snapshot of a manipulator's transform, delivered to motion observers
/// after every successful drag update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// Handle returned by `add_motion_callback`, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub type MotionCallback = Box<dyn FnMut(&MotionEvent)>;

/// The closed set of manipulator behaviors.
pub enum ManipKind {
    TranslateAxis(TranslateAxis),
    TranslatePlane(TranslatePlane),
    HandleBox(HandleBox),
}

impl ManipKind {
    pub fn render(&self, out: &mut DrawList) {
        match self {
            ManipKind::TranslateAxis(m) => m.render(out),
            ManipKind::TranslatePlane(m) => m.render(out),
            ManipKind::HandleBox(m) => m.render(out),
        }
    }

    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        match self {
            ManipKind::TranslateAxis(m) => m.intersect_ray(ray_start, ray_direction, results),
            ManipKind::TranslatePlane(m) => m.intersect_ray(ray_start, ray_direction, results),
            ManipKind::HandleBox(m) => m.intersect_ray(ray_start, ray_direction, results),
        }
    }

    pub fn highlight(&mut self, hit: &HitPoint) {
        match self {
            ManipKind::TranslateAxis(m) => m.highlight(hit),
            ManipKind::TranslatePlane(m) => m.highlight(hit),
            ManipKind::HandleBox(m) => m.highlight(hit),
        }
    }

    pub fn clear_highlight(&mut self) {
        match self {
            ManipKind::TranslateAxis(m) => m.clear_highlight(),
            ManipKind::TranslatePlane(m) => m.clear_highlight(),
            ManipKind::HandleBox(m) => m.clear_highlight(),
        }
    }

    pub fn make_active(&mut self, hit: &HitPoint, mods: Modifiers) {
        match self {
            ManipKind::TranslateAxis(m) => m.make_active(hit),
            ManipKind::TranslatePlane(m) => m.make_active(hit),
            ManipKind::HandleBox(m) => m.make_active(hit, mods),
        }
    }

    /// Runs one drag step. Returns whether the transform actually updated
    /// (degenerate projections skip the frame).
    pub fn drag(&mut self, ray_start: Vec3, ray_direction: Vec3) -> bool {
        match self {
            ManipKind::TranslateAxis(m) => m.drag(ray_start, ray_direction),
            ManipKind::TranslatePlane(m) => m.drag(ray_start, ray_direction),
            ManipKind::HandleBox(m) => m.drag(ray_start, ray_direction),
        }
    }

    pub fn make_inactive(&mut self) {
        match self {
            ManipKind::TranslateAxis(m) => m.make_inactive(),
            ManipKind::TranslatePlane(m) => m.make_inactive(),
            ManipKind::HandleBox(m) => m.make_inactive(),
        }
    }

    pub fn translation(&self) -> Vec3 {
        match self {
            ManipKind::TranslateAxis(m) => m.translation(),
            ManipKind::TranslatePlane(m) => m.translation(),
            ManipKind::HandleBox(m) => m.translation(),
        }
    }

    /// The manipulator's rotation; identity for kinds without one.
    pub fn rotation(&self) -> Quat {
        match self {
            ManipKind::HandleBox(m) => m.rotation(),
            _ => Quat::IDENTITY,
        }
    }

    pub fn scale(&self) -> Vec3 {
        match self {
            ManipKind::TranslateAxis(m) => m.scale(),
            ManipKind::TranslatePlane(m) => m.scale(),
            ManipKind::HandleBox(m) => m.scale(),
        }
    }
}

/// A manipulator: a drag state machine over an owned part tree, plus the
/// motion observers notified on each successful drag frame. Manipulators
/// are owned by the embedding application (normally inside a
/// `ManipRegistry`), never by the manager.
pub struct Manipulator {
    kind: ManipKind,
    observers: Vec<(u64, MotionCallback)>,
    next_observer: u64,
}

impl Manipulator {
    pub fn new(kind: ManipKind) -> Self {
        Self {
            kind,
            observers: Vec::new(),
            next_observer: 1,
        }
    }

    pub fn translate_axis() -> Self {
        Self::new(ManipKind::TranslateAxis(TranslateAxis::new()))
    }

    pub fn translate_plane() -> Self {
        Self::new(ManipKind::TranslatePlane(TranslatePlane::new()))
    }

    pub fn handle_box() -> Self {
        Self::new(ManipKind::HandleBox(HandleBox::new()))
    }

    pub fn kind(&self) -> &ManipKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ManipKind {
        &mut self.kind
    }

    pub fn as_translate_axis(&self) -> Option<&TranslateAxis> {
        match &self.kind {
            ManipKind::TranslateAxis(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_translate_axis_mut(&mut self) -> Option<&mut TranslateAxis> {
        match &mut self.kind {
            ManipKind::TranslateAxis(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_translate_plane(&self) -> Option<&TranslatePlane> {
        match &self.kind {
            ManipKind::TranslatePlane(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_translate_plane_mut(&mut self) -> Option<&mut TranslatePlane> {
        match &mut self.kind {
            ManipKind::TranslatePlane(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_handle_box(&self) -> Option<&HandleBox> {
        match &self.kind {
            ManipKind::HandleBox(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_handle_box_mut(&mut self) -> Option<&mut HandleBox> {
        match &mut self.kind {
            ManipKind::HandleBox(m) => Some(m),
            _ => None,
        }
    }

    pub fn render(&self, out: &mut DrawList) {
        self.kind.render(out);
    }

    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        self.kind.intersect_ray(ray_start, ray_direction, results);
    }

    pub fn highlight(&mut self, hit: &HitPoint) {
        self.kind.highlight(hit);
    }

    pub fn clear_highlight(&mut self) {
        self.kind.clear_highlight();
    }

    pub fn make_active(&mut self, hit: &HitPoint, mods: Modifiers) {
        self.kind.make_active(hit, mods);
    }

    /// Applies one drag step and, when the transform updated, notifies
    /// every registered observer. Registering the same callback twice
    /// means two notifications per frame.
    pub fn drag(&mut self, ray_start: Vec3, ray_direction: Vec3) {
        if self.kind.drag(ray_start, ray_direction) {
            let event = MotionEvent {
                translation: self.kind.translation(),
                rotation: self.kind.rotation(),
                scale: self.kind.scale(),
            };
            for (_, callback) in &mut self.observers {
                callback(&event);
            }
        }
    }

    pub fn make_inactive(&mut self) {
        self.kind.make_inactive();
    }

    pub fn translation(&self) -> Vec3 {
        self.kind.translation()
    }

    pub fn rotation(&self) -> Quat {
        self.kind.rotation()
    }

    pub fn scale(&self) -> Vec3 {
        self.kind.scale()
    }

    pub fn add_motion_callback(
        &mut self,
        callback: impl FnMut(&MotionEvent) + 'static,
    ) -> ObserverId {
        let id = self.next_observer;
        self.next_observer += 1;
        self.observers.push((id, Box::new(callback)));
        ObserverId(id)
    }

    /// Removes a previously registered callback. Returns false when the
    /// id is unknown (already removed).
    pub fn remove_motion_callback(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id.0);
        self.observers.len() != before
    }
}

impl From<ManipKind> for Manipulator {
    fn from(kind: ManipKind) -> Self {
        Self::new(kind)
    }
}
