mod group;
mod line_seg;
mod shapes;
mod tri;

pub use group::GroupPart;
pub use line_seg::LineSegPart;
pub use shapes::{cube_mesh, hollow_cube_face_mesh, square_mesh, two_way_arrow_mesh};
pub use tri::{TriMesh, TriPart};

use glam::{Mat4, Vec3};

use crate::hit::HitPoint;
use crate::render::DrawList;

/// Identifies a sub-part within its owning manipulator. Ids are assigned
/// by the manipulator when it assembles its geometry; `NONE` marks parts
/// that are never matched against (children hidden inside a composite).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

impl PartId {
    pub const NONE: PartId = PartId(0);
}

/// A visible or pickable piece of a manipulator. The set of shapes is
/// closed; manipulators assemble these into trees, with groups owning
/// their children exclusively.
pub enum Part {
    Tri(TriPart),
    LineSeg(LineSegPart),
    Group(GroupPart),
}

impl Part {
    pub fn id(&self) -> PartId {
        match self {
            Part::Tri(p) => p.id(),
            Part::LineSeg(p) => p.id(),
            Part::Group(p) => p.id(),
        }
    }

    /// Appends this part's geometry to the draw list. Invisible parts emit
    /// nothing.
    pub fn render(&self, out: &mut DrawList) {
        match self {
            Part::Tri(p) => p.render(out),
            Part::LineSeg(p) => p.render(out),
            Part::Group(p) => p.render(out),
        }
    }

    /// Intersects a ray with this part, appending any hits to `results`.
    /// Existing entries in `results` are never touched.
    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        match self {
            Part::Tri(p) => p.intersect_ray(ray_start, ray_direction, results),
            Part::LineSeg(_) => {}
            Part::Group(p) => p.intersect_ray(ray_start, ray_direction, results),
        }
    }

    pub fn set_transform(&mut self, xform: Mat4) {
        match self {
            Part::Tri(p) => p.set_transform(xform),
            Part::LineSeg(p) => p.set_transform(xform),
            Part::Group(p) => p.set_transform(xform),
        }
    }

    pub fn highlight(&mut self) {
        match self {
            Part::Tri(p) => p.highlight(),
            Part::LineSeg(p) => p.highlight(),
            Part::Group(p) => p.highlight(),
        }
    }

    pub fn clear_highlight(&mut self) {
        match self {
            Part::Tri(p) => p.clear_highlight(),
            Part::LineSeg(p) => p.clear_highlight(),
            Part::Group(p) => p.clear_highlight(),
        }
    }

    /// Whether ray tests consider this part at all. Line segments have no
    /// surface area and always report false.
    pub fn pickable(&self) -> bool {
        match self {
            Part::Tri(p) => p.pickable(),
            Part::LineSeg(_) => false,
            Part::Group(p) => p.pickable(),
        }
    }

    pub fn set_pickable(&mut self, pickable: bool) {
        match self {
            Part::Tri(p) => p.set_pickable(pickable),
            Part::LineSeg(_) => {}
            Part::Group(p) => p.set_pickable(pickable),
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Part::Tri(p) => p.visible(),
            Part::LineSeg(p) => p.visible(),
            Part::Group(p) => p.visible(),
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Part::Tri(p) => p.set_visible(visible),
            Part::LineSeg(p) => p.set_visible(visible),
            Part::Group(p) => p.set_visible(visible),
        }
    }
}

impl From<TriPart> for Part {
    fn from(part: TriPart) -> Self {
        Part::Tri(part)
    }
}

impl From<LineSegPart> for Part {
    fn from(part: LineSegPart) -> Self {
        Part::LineSeg(part)
    }
}

impl From<GroupPart> for Part {
    fn from(part: GroupPart) -> Self {
        Part::Group(part)
    }
}

#[cfg(test)]
mod tests;
