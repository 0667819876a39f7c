use std::sync::Arc;

use glam::{Mat4, Vec3};

use gripkit_geom::{intersect_ray_triangle, TriangleHit};

use crate::hit::HitPoint;
use crate::parts::PartId;
use crate::render::{DrawCmd, DrawList};

const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const DEFAULT_HIGHLIGHT_COLOR: [f32; 3] = [0.8, 0.8, 0.0];

/// Immutable triangle geometry shared by every instance of a shape.
/// Vertex and normal indices use the winged layout: runs of three indices
/// closed by a -1 terminator, one run per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub vertex_indices: Vec<i32>,
    pub normal_indices: Vec<i32>,
}

/// A pickable, renderable triangle-mesh part. The shared base geometry is
/// never mutated; the current transform is applied into per-instance
/// caches whenever it changes (positions through the full affine map,
/// normals through the linear part followed by renormalization).
pub struct TriPart {
    id: PartId,
    mesh: Arc<TriMesh>,
    xform: Mat4,
    cur_vertices: Vec<Vec3>,
    cur_normals: Vec<Vec3>,
    color: [f32; 3],
    highlight_color: [f32; 3],
    highlighted: bool,
    visible: bool,
    pickable: bool,
}

impl TriPart {
    pub fn new(id: PartId, mesh: Arc<TriMesh>) -> Self {
        let mut part = Self {
            id,
            mesh,
            xform: Mat4::IDENTITY,
            cur_vertices: Vec::new(),
            cur_normals: Vec::new(),
            color: DEFAULT_COLOR,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            highlighted: false,
            visible: true,
            pickable: true,
        };
        part.recalc_vertices();
        part
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn set_highlight_color(&mut self, color: [f32; 3]) {
        self.highlight_color = color;
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.visible {
            return;
        }
        let mut positions = Vec::with_capacity(self.mesh.vertex_indices.len() / 4 * 3);
        let mut normals = Vec::with_capacity(positions.capacity());
        for (tri, normal_tri) in self
            .mesh
            .vertex_indices
            .chunks_exact(4)
            .zip(self.mesh.normal_indices.chunks_exact(4))
        {
            for (&vi, &ni) in tri[..3].iter().zip(&normal_tri[..3]) {
                positions.push(self.cur_vertices[vi as usize].to_array());
                normals.push(self.cur_normals[ni as usize].to_array());
            }
        }
        out.push(DrawCmd::Triangles {
            positions,
            normals,
            color: if self.highlighted {
                self.highlight_color
            } else {
                self.color
            },
        });
    }

    /// Tests every triangle against the ray. Hits behind the ray origin
    /// are discarded; this part only ever reports visible surfaces.
    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3, results: &mut Vec<HitPoint>) {
        if !self.pickable {
            return;
        }
        for tri in self.mesh.vertex_indices.chunks_exact(4) {
            let v0 = self.cur_vertices[tri[0] as usize];
            let v1 = self.cur_vertices[tri[1] as usize];
            let v2 = self.cur_vertices[tri[2] as usize];
            if let TriangleHit::Hit { point, t } =
                intersect_ray_triangle(ray_start, ray_direction, v0, v1, v2)
            {
                if t >= 0.0 {
                    results.push(HitPoint {
                        manip: None,
                        part: self.id,
                        ray_start,
                        ray_direction,
                        t,
                        point,
                        uv: None,
                    });
                }
            }
        }
    }

    pub fn set_transform(&mut self, xform: Mat4) {
        self.xform = xform;
        self.recalc_vertices();
    }

    pub fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
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

    fn recalc_vertices(&mut self) {
        self.cur_vertices.clear();
        self.cur_normals.clear();
        self.cur_vertices
            .extend(self.mesh.vertices.iter().map(|v| self.xform.transform_point3(*v)));
        self.cur_normals.extend(
            self.mesh
                .normals
                .iter()
                .map(|n| self.xform.transform_vector3(*n).normalize_or_zero()),
        );
    }
}
