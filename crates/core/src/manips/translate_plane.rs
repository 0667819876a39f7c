use glam::{Mat4, Vec3, Vec4};

use gripkit_geom::{perpendicular, Plane};

use crate::hit::HitPoint;
use crate::parts::{two_way_arrow_mesh, GroupPart, Part, PartId, TriPart};
use crate::render::DrawList;

const GEOMETRY_ID: PartId = PartId(1);

struct PlaneDrag {
    plane: Plane,
    offset: Vec3,
}

/// Translation constrained to a plane with a fixed normal. The default
/// geometry is two crossed two-way arrows spanning the plane; dragging
/// intersects the pick ray with the recorded plane and adds back the grab
/// offset.
pub struct TranslatePlane {
    translation: Vec3,
    normal: Vec3,
    scale: Vec3,
    geometry: Part,
    drag_state: Option<PlaneDrag>,
}

impl Default for TranslatePlane {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatePlane {
    pub fn new() -> Self {
        let mut manip = Self {
            translation: Vec3::ZERO,
            normal: Vec3::Y,
            scale: Vec3::ONE,
            geometry: default_geometry(),
            drag_state: None,
        };
        manip.recalc();
        manip
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.recalc();
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Sets the plane normal. A zero vector is a usage error: it is
    /// reported and the previous normal is kept.
    pub fn set_normal(&mut self, normal: Vec3) {
        if normal.length_squared() == 0.0 {
            tracing::error!("plane normal must be a non-zero vector, keeping previous normal");
            return;
        }
        self.normal = normal.normalize();
        self.recalc();
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recalc();
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Swaps in caller-supplied geometry; `None` restores the default
    /// crossed arrows. The previous geometry is dropped.
    pub fn replace_geometry(&mut self, geometry: Option<Part>) {
        self.geometry = geometry.unwrap_or_else(default_geometry);
        self.recalc();
    }

    pub fn render(&self, out: &mut DrawList) {
        self.geometry.render(out);
    }

    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        self.geometry.intersect_ray(ray_start, ray_direction, results);
    }

    pub fn highlight(&mut self, hit: &HitPoint) {
        if hit.part != self.geometry.id() {
            tracing::error!("hit does not reference this manipulator's geometry");
            return;
        }
        self.geometry.highlight();
    }

    pub fn clear_highlight(&mut self) {
        self.geometry.clear_highlight();
    }

    pub fn make_active(&mut self, hit: &HitPoint) {
        self.geometry.highlight();
        self.drag_state = Some(PlaneDrag {
            plane: Plane::new(self.normal, hit.point),
            offset: self.translation - hit.point,
        });
    }

    /// One drag step; returns whether the translation updated. A ray
    /// parallel to the drag plane skips the frame.
    pub fn drag(&mut self, ray_start: Vec3, ray_direction: Vec3) -> bool {
        let Some(state) = &self.drag_state else {
            return false;
        };
        let Some((point, _t)) = state.plane.intersect_ray(ray_start, ray_direction) else {
            return false;
        };
        self.translation = point + state.offset;
        self.recalc();
        true
    }

    pub fn make_inactive(&mut self) {
        self.geometry.clear_highlight();
        self.drag_state = None;
    }

    fn recalc(&mut self) {
        // Rotation maps local y onto the plane normal; x and z span the
        // plane itself.
        let Some(p0) = perpendicular(self.normal) else {
            return;
        };
        let p0 = p0.normalize();
        let p1 = self.normal.cross(p0).normalize();
        let rot = Mat4::from_cols(
            p1.extend(0.0),
            self.normal.extend(0.0),
            p0.extend(0.0),
            Vec4::W,
        );
        let xform =
            Mat4::from_translation(self.translation) * rot * Mat4::from_scale(self.scale);
        self.geometry.set_transform(xform);
    }
}

fn default_geometry() -> Part {
    let mut group = GroupPart::new(GEOMETRY_ID);
    group.add_part(TriPart::new(PartId::NONE, two_way_arrow_mesh()));
    // Second arrow, rotated a quarter turn in the plane (local x onto -z).
    let offset = Mat4::from_cols(
        Vec4::new(0.0, 0.0, -1.0, 0.0),
        Vec4::Y,
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::W,
    );
    let mut crossed = GroupPart::with_offset(PartId::NONE, offset);
    crossed.add_part(TriPart::new(PartId::NONE, two_way_arrow_mesh()));
    group.add_part(crossed);
    group.into()
}
