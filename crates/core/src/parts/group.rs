use glam::{Mat4, Vec3};

use crate::hit::HitPoint;
use crate::parts::{Part, PartId};
use crate::render::DrawList;

/// An ordered collection of exclusively-owned child parts that behaves as
/// one atomic pickable unit: hits collected from children are relabeled
/// with the group's own id, so callers never see inside.
///
/// With an offset transform installed the group doubles as the
/// transform-composite: an externally supplied transform X reaches the
/// children as `X * offset`, which lets a manipulator park parts at fixed
/// local positions around a shared pivot and drive them all with a single
/// transform update.
pub struct GroupPart {
    id: PartId,
    children: Vec<Part>,
    offset: Option<Mat4>,
    visible: bool,
    pickable: bool,
}

impl GroupPart {
    pub fn new(id: PartId) -> Self {
        Self {
            id,
            children: Vec::new(),
            offset: None,
            visible: true,
            pickable: true,
        }
    }

    /// A group that applies `offset` before any externally set transform.
    pub fn with_offset(id: PartId, offset: Mat4) -> Self {
        Self {
            offset: Some(offset),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn offset_transform(&self) -> Option<Mat4> {
        self.offset
    }

    pub fn set_offset_transform(&mut self, offset: Mat4) {
        self.offset = Some(offset);
    }

    /// Appends a child and returns its index within this group.
    pub fn add_part(&mut self, part: impl Into<Part>) -> usize {
        self.children.push(part.into());
        self.children.len() - 1
    }

    /// Removes and returns the child at `index`, if it exists.
    pub fn remove_part(&mut self, index: usize) -> Option<Part> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn part(&self, index: usize) -> Option<&Part> {
        self.children.get(index)
    }

    pub fn part_mut(&mut self, index: usize) -> Option<&mut Part> {
        self.children.get_mut(index)
    }

    /// Index of the first child with the given id, if any.
    pub fn find_part(&self, id: PartId) -> Option<usize> {
        self.children.iter().position(|part| part.id() == id)
    }

    pub fn num_parts(&self) -> usize {
        self.children.len()
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.visible {
            return;
        }
        for child in &self.children {
            child.render(out);
        }
    }

    /// Delegates the ray test to every child, then relabels the new hits
    /// so this group appears to be the part that was intersected. A
    /// non-pickable group produces no hits without testing children.
    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        if !self.pickable {
            return;
        }
        let top = results.len();
        for child in &self.children {
            child.intersect_ray(ray_start, ray_direction, results);
        }
        for hit in &mut results[top..] {
            hit.part = self.id;
        }
    }

    pub fn set_transform(&mut self, xform: Mat4) {
        let total = match self.offset {
            Some(offset) => xform * offset,
            None => xform,
        };
        for child in &mut self.children {
            child.set_transform(total);
        }
    }

    pub fn highlight(&mut self) {
        for child in &mut self.children {
            child.highlight();
        }
    }

    pub fn clear_highlight(&mut self) {
        for child in &mut self.children {
            child.clear_highlight();
        }
    }

    pub fn pickable(&self) -> bool {
        self.pickable
    }

    pub fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
