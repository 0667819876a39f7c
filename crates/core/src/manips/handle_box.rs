use glam::{Mat4, Quat, Vec2, Vec3};

use gripkit_geom::{sign, Line, Plane, PlaneUv};

use crate::hit::HitPoint;
use crate::manips::Modifiers;
use crate::parts::{cube_mesh, square_mesh, GroupPart, LineSegPart, Part, PartId, TriPart};
use crate::render::DrawList;

// Part id layout: 12 edge segments, then 6 faces, 6 rotation handles and
// 8 corner scale handles.
const SEG_BASE: u32 = 1;
const FACE_BASE: u32 = 13;
const ROTATE_BASE: u32 = 19;
const SCALE_BASE: u32 = 25;

const NUM_SEGS: usize = 12;
const NUM_FACES: usize = 6;
const NUM_ROTATE_HANDLES: usize = 6;
const NUM_SCALE_HANDLES: usize = 8;

fn seg_id(index: usize) -> PartId {
    PartId(SEG_BASE + index as u32)
}

fn face_id(index: usize) -> PartId {
    PartId(FACE_BASE + index as u32)
}

fn rotate_id(index: usize) -> PartId {
    PartId(ROTATE_BASE + index as u32)
}

fn scale_id(index: usize) -> PartId {
    PartId(SCALE_BASE + index as u32)
}

fn index_in(id: PartId, base: u32, count: usize) -> Option<usize> {
    let offset = id.0.checked_sub(base)? as usize;
    (offset < count).then_some(offset)
}

/// The axis pair a face constrains single-axis scaling to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScaleAxes {
    Xy,
    Yz,
    Zx,
}

impl ScaleAxes {
    fn uv_axes(self) -> (Vec3, Vec3) {
        match self {
            ScaleAxes::Xy => (Vec3::X, Vec3::Y),
            ScaleAxes::Yz => (Vec3::Y, Vec3::Z),
            ScaleAxes::Zx => (Vec3::Z, Vec3::X),
        }
    }
}

struct FaceInfo {
    /// Invisible pickable square covering the face; exists purely for
    /// hit-testing.
    square: Part,
    orig_normal: Vec3,
    /// Current world-space normal, updated on every transform recompute.
    normal: Vec3,
    /// The four boundary segments highlighted on behalf of this face.
    segs: [usize; 4],
    scale_axes: ScaleAxes,
}

struct RotateHandleInfo {
    /// The two candidate rotation faces this handle sits between.
    face0: usize,
    face1: usize,
    geometry: Part,
}

struct ScaleHandleInfo {
    /// The three faces adjacent to this corner.
    faces: [usize; 3],
    geometry: Part,
}

/// Which parts are currently lit, so highlights can be cleared without
/// walking the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartRef {
    Seg(usize),
    Rotate(usize),
    Scale(usize),
}

#[derive(Clone, Copy)]
enum DragState {
    Inactive,
    Translate {
        plane: Plane,
        offset: Vec3,
    },
    Rotate {
        plane: PlaneUv,
        start_angle: f32,
        start_rot: Quat,
    },
    ScaleUniform {
        line: Line,
        orig_scale: Vec3,
        orig_len: f32,
    },
    ScaleAxis {
        /// UV plane through the grab point.
        plane: PlaneUv,
        /// Grab point in UV coordinates relative to the box center.
        grab_uv: Vec2,
        axes: ScaleAxes,
        orig_scale: Vec3,
    },
}

/// A wireframe box combining translation, rotation and scaling: the box
/// faces translate in their own plane, six outboard handles rotate about
/// the face most parallel to the view ray, and the eight corner handles
/// scale (uniformly, or along a single snapped axis with shift held).
pub struct HandleBox {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    geometry_scale: Vec3,
    line_segs: Vec<Part>,
    faces: Vec<FaceInfo>,
    rotate_handles: Vec<RotateHandleInfo>,
    scale_handles: Vec<ScaleHandleInfo>,
    highlighted: Vec<PartRef>,
    dragged: Vec<PartRef>,
    state: DragState,
}

impl Default for HandleBox {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleBox {
    pub fn new() -> Self {
        let mut manip = Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry_scale: Vec3::ONE,
            line_segs: Vec::new(),
            faces: Vec::new(),
            rotate_handles: Vec::new(),
            scale_handles: Vec::new(),
            highlighted: Vec::new(),
            dragged: Vec::new(),
            state: DragState::Inactive,
        };
        manip.create_geometry();
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

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.recalc();
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recalc();
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Extra scale applied to the box geometry only, on top of the user
    /// scale; lets embedders fit the box around differently sized objects
    /// without disturbing the reported scale.
    pub fn set_geometry_scale(&mut self, geometry_scale: Vec3) {
        self.geometry_scale = geometry_scale;
        self.recalc();
    }

    pub fn geometry_scale(&self) -> Vec3 {
        self.geometry_scale
    }

    pub fn render(&self, out: &mut DrawList) {
        for seg in &self.line_segs {
            seg.render(out);
        }
        for handle in &self.rotate_handles {
            handle.geometry.render(out);
        }
        for handle in &self.scale_handles {
            handle.geometry.render(out);
        }
    }

    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        for face in &self.faces {
            face.square.intersect_ray(ray_start, ray_direction, results);
        }
        for handle in &self.rotate_handles {
            handle.geometry.intersect_ray(ray_start, ray_direction, results);
        }
        for handle in &self.scale_handles {
            handle.geometry.intersect_ray(ray_start, ray_direction, results);
        }
    }

    /// Lights up the part under the cursor. A face lights its four
    /// boundary segments; the face square itself is invisible.
    pub fn highlight(&mut self, hit: &HitPoint) {
        let Some(refs) = self.part_refs_for(hit.part) else {
            tracing::error!("hit does not reference any handle box part");
            return;
        };
        for part_ref in refs {
            self.set_highlight(part_ref);
            self.highlighted.push(part_ref);
        }
    }

    pub fn clear_highlight(&mut self) {
        while let Some(part_ref) = self.highlighted.pop() {
            self.clear_part_highlight(part_ref);
        }
    }

    pub fn make_active(&mut self, hit: &HitPoint, mods: Modifiers) {
        if let Some(face) = index_in(hit.part, FACE_BASE, NUM_FACES) {
            self.state = DragState::Translate {
                plane: Plane::new(self.faces[face].normal, hit.point),
                offset: self.translation - hit.point,
            };
            for i in 0..4 {
                let seg = self.faces[face].segs[i];
                self.set_highlight(PartRef::Seg(seg));
                self.dragged.push(PartRef::Seg(seg));
            }
        } else if let Some(handle) = index_in(hit.part, ROTATE_BASE, NUM_ROTATE_HANDLES) {
            self.activate_rotate(handle, hit);
        } else if let Some(handle) = index_in(hit.part, SCALE_BASE, NUM_SCALE_HANDLES) {
            self.activate_scale(handle, hit, mods);
        } else {
            tracing::error!("activation hit does not reference any handle box part");
        }
    }

    /// One drag step; returns whether the transform updated. Degenerate
    /// projections (ray parallel to the reference geometry) skip the
    /// frame.
    pub fn drag(&mut self, ray_start: Vec3, ray_direction: Vec3) -> bool {
        match self.state {
            DragState::Inactive => false,
            DragState::Translate { plane, offset } => {
                let Some((point, _t)) = plane.intersect_ray(ray_start, ray_direction) else {
                    return false;
                };
                self.translation = point + offset;
                self.recalc();
                true
            }
            DragState::Rotate {
                plane,
                start_angle,
                start_rot,
            } => {
                let Some(hit) = plane.intersect_ray(ray_start, ray_direction) else {
                    return false;
                };
                let angle = hit.uv.y.atan2(hit.uv.x) - start_angle;
                let offset_rot = Quat::from_axis_angle(plane.normal(), angle);
                self.rotation = (offset_rot * start_rot).normalize();
                self.recalc();
                true
            }
            DragState::ScaleUniform {
                line,
                orig_scale,
                orig_len,
            } => {
                let Some(closest) = line.closest_point_to_ray(ray_start, ray_direction) else {
                    return false;
                };
                let new_diff = closest - self.translation;
                if new_diff.dot(line.direction()) < 0.0 {
                    // Dragged through the center; clamp to zero rather
                    // than going negative.
                    self.scale = Vec3::ZERO;
                } else {
                    self.scale = orig_scale * (new_diff.length() / orig_len);
                }
                self.recalc();
                true
            }
            DragState::ScaleAxis {
                plane,
                grab_uv,
                axes,
                orig_scale,
            } => {
                let Some(hit) = plane.intersect_ray(ray_start, ray_direction) else {
                    return false;
                };
                // Hit relative to the grab point, and to the box center.
                let mut uv = hit.uv;
                let face_uv = hit.uv + grab_uv;
                let same_quadrant = sign(face_uv.x) == sign(grab_uv.x)
                    && sign(face_uv.y) == sign(grab_uv.y);
                if same_quadrant {
                    if face_uv.x < 0.0 {
                        uv.x = -uv.x;
                    }
                    if face_uv.y < 0.0 {
                        uv.y = -uv.y;
                    }
                    // Snap to whichever in-plane axis moved further.
                    let mut scale_vec = Vec3::ZERO;
                    if uv.x.abs() > uv.y.abs() {
                        match axes {
                            ScaleAxes::Xy => scale_vec.x = uv.x,
                            ScaleAxes::Yz => scale_vec.y = uv.x,
                            ScaleAxes::Zx => scale_vec.z = uv.x,
                        }
                    } else {
                        match axes {
                            ScaleAxes::Xy => scale_vec.y = uv.y,
                            ScaleAxes::Yz => scale_vec.z = uv.y,
                            ScaleAxes::Zx => scale_vec.x = uv.y,
                        }
                    }
                    scale_vec /= self.geometry_scale;
                    self.scale = orig_scale + scale_vec;
                } else {
                    // Quadrant flipped: the drag crossed the pivot. Snap
                    // the affected axis to zero instead of going negative.
                    if uv.x.abs() > uv.y.abs() {
                        match axes {
                            ScaleAxes::Xy => self.scale.x = 0.0,
                            ScaleAxes::Yz => self.scale.y = 0.0,
                            ScaleAxes::Zx => self.scale.z = 0.0,
                        }
                    } else {
                        match axes {
                            ScaleAxes::Xy => self.scale.y = 0.0,
                            ScaleAxes::Yz => self.scale.z = 0.0,
                            ScaleAxes::Zx => self.scale.x = 0.0,
                        }
                    }
                }
                self.recalc();
                true
            }
        }
    }

    pub fn make_inactive(&mut self) {
        self.state = DragState::Inactive;
        while let Some(part_ref) = self.dragged.pop() {
            self.clear_part_highlight(part_ref);
        }
    }

    fn activate_rotate(&mut self, handle: usize, hit: &HitPoint) {
        let info = &self.rotate_handles[handle];
        // The handle sits between two candidate rotation planes; favor
        // the one facing the viewer (larger |dot| with the ray).
        let dotp0 = hit.ray_direction.dot(self.faces[info.face0].normal).abs();
        let dotp1 = hit.ray_direction.dot(self.faces[info.face1].normal).abs();
        let face = if dotp0 > dotp1 { info.face0 } else { info.face1 };
        let plane = match PlaneUv::new(self.faces[face].normal, self.translation) {
            Ok(plane) => plane,
            Err(err) => {
                tracing::warn!("rotation plane is degenerate ({}), ignoring activation", err);
                return;
            }
        };
        let (_, start_uv) = plane.project_point(hit.point);
        self.state = DragState::Rotate {
            plane,
            start_angle: start_uv.y.atan2(start_uv.x),
            start_rot: self.rotation,
        };
        self.set_highlight(PartRef::Rotate(handle));
        self.dragged.push(PartRef::Rotate(handle));
    }

    fn activate_scale(&mut self, handle: usize, hit: &HitPoint, mods: Modifiers) {
        if mods.shift {
            let info = &self.scale_handles[handle];
            // Among the three adjacent faces, scale in the plane of the
            // one whose normal points most directly back at the viewer.
            let mut face = info.faces[0];
            let mut best_dot = self.faces[face].normal.dot(hit.ray_direction);
            for &candidate in &info.faces[1..] {
                let dot = self.faces[candidate].normal.dot(hit.ray_direction);
                if dot < best_dot {
                    best_dot = dot;
                    face = candidate;
                }
            }
            let axes = self.faces[face].scale_axes;
            let (u_orig, v_orig) = axes.uv_axes();
            let u_axis = self.rotation * u_orig;
            let v_axis = self.rotation * v_orig;
            let plane = match PlaneUv::with_uv(u_axis.cross(v_axis), hit.point, u_axis, v_axis) {
                Ok(plane) => plane,
                Err(err) => {
                    tracing::warn!("scale plane is degenerate ({}), ignoring activation", err);
                    return;
                }
            };
            let grab_rel_center = hit.point - self.translation;
            self.state = DragState::ScaleAxis {
                plane,
                grab_uv: Vec2::new(
                    grab_rel_center.dot(plane.u_axis()),
                    grab_rel_center.dot(plane.v_axis()),
                ),
                axes,
                orig_scale: self.scale,
            };
        } else {
            let diff = hit.point - self.translation;
            match Line::new(diff, hit.point) {
                Ok(line) => {
                    self.state = DragState::ScaleUniform {
                        line,
                        orig_scale: self.scale,
                        orig_len: diff.length(),
                    };
                }
                Err(err) => {
                    tracing::warn!("scale grab is degenerate ({}), ignoring activation", err);
                    return;
                }
            }
        }
        self.set_highlight(PartRef::Scale(handle));
        self.dragged.push(PartRef::Scale(handle));
    }

    /// Parts that light up for a hit on the given id: a face maps to its
    /// four segments, handles map to themselves.
    fn part_refs_for(&self, id: PartId) -> Option<Vec<PartRef>> {
        if let Some(face) = index_in(id, FACE_BASE, NUM_FACES) {
            Some(self.faces[face].segs.iter().map(|&s| PartRef::Seg(s)).collect())
        } else if let Some(handle) = index_in(id, ROTATE_BASE, NUM_ROTATE_HANDLES) {
            Some(vec![PartRef::Rotate(handle)])
        } else if let Some(handle) = index_in(id, SCALE_BASE, NUM_SCALE_HANDLES) {
            Some(vec![PartRef::Scale(handle)])
        } else if let Some(seg) = index_in(id, SEG_BASE, NUM_SEGS) {
            Some(vec![PartRef::Seg(seg)])
        } else {
            None
        }
    }

    fn set_highlight(&mut self, part_ref: PartRef) {
        match part_ref {
            PartRef::Seg(i) => self.line_segs[i].highlight(),
            PartRef::Rotate(i) => self.rotate_handles[i].geometry.highlight(),
            PartRef::Scale(i) => self.scale_handles[i].geometry.highlight(),
        }
    }

    fn clear_part_highlight(&mut self, part_ref: PartRef) {
        match part_ref {
            PartRef::Seg(i) => self.line_segs[i].clear_highlight(),
            PartRef::Rotate(i) => self.rotate_handles[i].geometry.clear_highlight(),
            PartRef::Scale(i) => self.scale_handles[i].geometry.clear_highlight(),
        }
    }

    fn recalc(&mut self) {
        let xform = Mat4::from_scale_rotation_translation(
            self.scale * self.geometry_scale,
            self.rotation,
            self.translation,
        );
        for seg in &mut self.line_segs {
            seg.set_transform(xform);
        }
        for face in &mut self.faces {
            face.square.set_transform(xform);
            face.normal = xform.transform_vector3(face.orig_normal).normalize_or_zero();
        }
        for handle in &mut self.rotate_handles {
            handle.geometry.set_transform(xform);
        }
        for handle in &mut self.scale_handles {
            handle.geometry.set_transform(xform);
        }
    }

    fn create_geometry(&mut self) {
        // 12 edge segments. Top face: front, left, back, right; the four
        // vertical middle segments; bottom face in the same order.
        let seg_placements: [(Vec3, Vec3, Vec3); NUM_SEGS] = [
            (Vec3::new(0.0, 1.0, 1.0), Vec3::X, Vec3::Y),
            (Vec3::new(-1.0, 1.0, 0.0), Vec3::Z, Vec3::Y),
            (Vec3::new(0.0, 1.0, -1.0), Vec3::X, Vec3::Y),
            (Vec3::new(1.0, 1.0, 0.0), Vec3::Z, Vec3::Y),
            (Vec3::new(-1.0, 0.0, 1.0), Vec3::NEG_Y, Vec3::X),
            (Vec3::new(-1.0, 0.0, -1.0), Vec3::NEG_Y, Vec3::X),
            (Vec3::new(1.0, 0.0, -1.0), Vec3::NEG_Y, Vec3::X),
            (Vec3::new(1.0, 0.0, 1.0), Vec3::NEG_Y, Vec3::X),
            (Vec3::new(0.0, -1.0, 1.0), Vec3::X, Vec3::Y),
            (Vec3::new(-1.0, -1.0, 0.0), Vec3::Z, Vec3::Y),
            (Vec3::new(0.0, -1.0, -1.0), Vec3::X, Vec3::Y),
            (Vec3::new(1.0, -1.0, 0.0), Vec3::Z, Vec3::Y),
        ];
        self.line_segs = seg_placements
            .iter()
            .enumerate()
            .map(|(i, &(translation, x_axis, y_axis))| {
                line_seg_part(seg_id(i), translation, x_axis, y_axis)
            })
            .collect();

        // 6 faces: front, right, back, left, top, bottom. Each records
        // its boundary segments and the axis pair its plane scales.
        let face_defs: [(Vec3, Vec3, [usize; 4], ScaleAxes); NUM_FACES] = [
            (Vec3::Z, Vec3::Y, [0, 4, 7, 8], ScaleAxes::Xy),
            (Vec3::X, Vec3::Y, [3, 6, 7, 11], ScaleAxes::Yz),
            (Vec3::NEG_Z, Vec3::Y, [2, 5, 6, 10], ScaleAxes::Xy),
            (Vec3::NEG_X, Vec3::Y, [1, 4, 5, 9], ScaleAxes::Yz),
            (Vec3::Y, Vec3::NEG_Z, [0, 1, 2, 3], ScaleAxes::Zx),
            (Vec3::NEG_Y, Vec3::Z, [8, 9, 10, 11], ScaleAxes::Zx),
        ];
        self.faces = face_defs
            .iter()
            .enumerate()
            .map(|(i, &(normal, up, segs, scale_axes))| FaceInfo {
                square: face_part(face_id(i), normal, normal, up),
                orig_normal: normal,
                normal,
                segs,
                scale_axes,
            })
            .collect();

        // 6 rotation handles: front, right, back, left, top, bottom. Each
        // references the two faces whose planes it can rotate in.
        let rotate_defs: [(Vec3, usize, usize); NUM_ROTATE_HANDLES] = [
            (Vec3::Z, 4, 1),
            (Vec3::X, 4, 0),
            (Vec3::NEG_Z, 4, 1),
            (Vec3::NEG_X, 4, 0),
            (Vec3::Y, 0, 1),
            (Vec3::NEG_Y, 0, 1),
        ];
        self.rotate_handles = rotate_defs
            .iter()
            .enumerate()
            .map(|(i, &(direction, face0, face1))| RotateHandleInfo {
                face0,
                face1,
                geometry: rotate_handle_part(rotate_id(i), direction),
            })
            .collect();

        // 8 corner scale handles, each adjacent to three faces.
        let scale_defs: [(Vec3, [usize; 3]); NUM_SCALE_HANDLES] = [
            (Vec3::new(1.0, 1.0, 1.0), [0, 1, 4]),
            (Vec3::new(1.0, 1.0, -1.0), [1, 2, 4]),
            (Vec3::new(1.0, -1.0, 1.0), [0, 1, 5]),
            (Vec3::new(1.0, -1.0, -1.0), [1, 2, 5]),
            (Vec3::new(-1.0, 1.0, 1.0), [0, 3, 4]),
            (Vec3::new(-1.0, 1.0, -1.0), [2, 3, 4]),
            (Vec3::new(-1.0, -1.0, 1.0), [0, 3, 5]),
            (Vec3::new(-1.0, -1.0, -1.0), [2, 3, 5]),
        ];
        self.scale_handles = scale_defs
            .iter()
            .enumerate()
            .map(|(i, &(position, faces))| ScaleHandleInfo {
                faces,
                geometry: scale_handle_part(scale_id(i), position),
            })
            .collect();
    }
}

fn line_seg_part(id: PartId, translation: Vec3, x_axis: Vec3, y_axis: Vec3) -> Part {
    let z_axis = x_axis.cross(y_axis);
    let offset = Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        translation.extend(1.0),
    );
    let mut group = GroupPart::with_offset(id, offset);
    group.add_part(LineSegPart::new(PartId::NONE));
    group.into()
}

fn face_part(id: PartId, translation: Vec3, normal: Vec3, up: Vec3) -> Part {
    let right = up.cross(normal);
    let offset = Mat4::from_cols(
        right.extend(0.0),
        up.extend(0.0),
        normal.extend(0.0),
        translation.extend(1.0),
    );
    let mut group = GroupPart::with_offset(id, offset);
    let mut square = TriPart::new(PartId::NONE, square_mesh());
    square.set_visible(false);
    group.add_part(square);
    group.into()
}

fn rotate_handle_part(id: PartId, direction: Vec3) -> Part {
    let offset = Mat4::from_translation(2.0 * direction) * Mat4::from_scale(Vec3::splat(0.1));
    let mut group = GroupPart::with_offset(id, offset);
    group.add_part(TriPart::new(PartId::NONE, cube_mesh()));
    group.into()
}

fn scale_handle_part(id: PartId, position: Vec3) -> Part {
    let offset = Mat4::from_translation(position) * Mat4::from_scale(Vec3::splat(0.1));
    let mut group = GroupPart::with_offset(id, offset);
    group.add_part(TriPart::new(PartId::NONE, cube_mesh()));
    group.into()
}
