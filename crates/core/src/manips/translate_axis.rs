use glam::{Mat4, Vec3, Vec4};

use gripkit_geom::{perpendicular, Line};

use crate::hit::HitPoint;
use crate::parts::{two_way_arrow_mesh, Part, PartId, TriPart};
use crate::render::DrawList;

const GEOMETRY_ID: PartId = PartId(1);

struct AxisDrag {
    line: Line,
    offset: Vec3,
}

/// Translation constrained to a single axis. The default geometry is a
/// two-way arrow along the axis; dragging finds the closest point on the
/// axis line to the pick ray and adds back the initial grab offset, so the
/// grabbed point stays under the cursor.
pub struct TranslateAxis {
    translation: Vec3,
    axis: Vec3,
    scale: Vec3,
    geometry: Part,
    drag_state: Option<AxisDrag>,
}

impl Default for TranslateAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslateAxis {
    pub fn new() -> Self {
        let mut manip = Self {
            translation: Vec3::ZERO,
            axis: Vec3::X,
            scale: Vec3::ONE,
            geometry: TriPart::new(GEOMETRY_ID, two_way_arrow_mesh()).into(),
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

    /// Sets the translation axis. A zero vector is a usage error: it is
    /// reported and the previous axis is kept.
    pub fn set_axis(&mut self, axis: Vec3) {
        if axis.length_squared() == 0.0 {
            tracing::error!("translation axis must be a non-zero vector, keeping previous axis");
            return;
        }
        self.axis = axis.normalize();
        self.recalc();
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recalc();
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Swaps in caller-supplied geometry; `None` restores the default
    /// arrow. The previous geometry is dropped.
    pub fn replace_geometry(&mut self, geometry: Option<Part>) {
        self.geometry =
            geometry.unwrap_or_else(|| TriPart::new(GEOMETRY_ID, two_way_arrow_mesh()).into());
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
        // The axis is kept non-zero by set_axis, so the line is valid.
        let Ok(line) = Line::new(self.axis, hit.point) else {
            tracing::error!("translation axis degenerated, ignoring activation");
            return;
        };
        self.drag_state = Some(AxisDrag {
            line,
            offset: self.translation - hit.point,
        });
    }

    /// One drag step; returns whether the translation updated. A ray
    /// parallel to the drag axis skips the frame.
    pub fn drag(&mut self, ray_start: Vec3, ray_direction: Vec3) -> bool {
        let Some(state) = &self.drag_state else {
            return false;
        };
        let Some(closest) = state.line.closest_point_to_ray(ray_start, ray_direction) else {
            return false;
        };
        self.translation = closest + state.offset;
        self.recalc();
        true
    }

    pub fn make_inactive(&mut self) {
        self.geometry.clear_highlight();
        self.drag_state = None;
    }

    fn recalc(&mut self) {
        // Local-to-world is T * R * S with the rotation mapping local x
        // onto the axis and y/z onto perpendiculars.
        let Some(p0) = perpendicular(self.axis) else {
            return;
        };
        let p0 = p0.normalize();
        let p1 = self.axis.cross(p0).normalize();
        let rot = Mat4::from_cols(
            self.axis.extend(0.0),
            p0.extend(0.0),
            p1.extend(0.0),
            Vec4::W,
        );
        let xform =
            Mat4::from_translation(self.translation) * rot * Mat4::from_scale(self.scale);
        self.geometry.set_transform(xform);
    }
}
