use std::sync::{Arc, OnceLock};

use glam::Vec3;

use gripkit_geom::faceted_normals;

use crate::parts::TriMesh;

// Shared shape tables, built once per process. The manipulators hand out
// Arc clones so every instance of a shape reuses the same base geometry.

const CUBE_VERTICES: [[f32; 3]; 8] = [
    // Front side
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    // Back side
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [i32; 48] = [
    // Front face
    0, 1, 2, -1,
    0, 2, 3, -1,
    // Right face
    3, 2, 6, -1,
    3, 6, 7, -1,
    // Back face
    7, 6, 5, -1,
    7, 5, 4, -1,
    // Left face
    4, 5, 1, -1,
    4, 1, 0, -1,
    // Top face
    4, 0, 3, -1,
    4, 3, 7, -1,
    // Bottom face
    1, 5, 6, -1,
    1, 6, 2, -1,
];

const SQUARE_VERTICES: [[f32; 3]; 4] = [
    // Counter-clockwise, starting from upper left
    [-1.0, 1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
];

#[rustfmt::skip]
const SQUARE_INDICES: [i32; 8] = [
    0, 1, 2, -1,
    0, 2, 3, -1,
];

const HOLLOW_FACE_VERTICES: [[f32; 3]; 8] = [
    // Outer square, counter-clockwise, starting from upper left
    [-1.0, 1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    // Inner square
    [-0.9, 0.9, 0.0],
    [-0.9, -0.9, 0.0],
    [0.9, -0.9, 0.0],
    [0.9, 0.9, 0.0],
];

#[rustfmt::skip]
const HOLLOW_FACE_INDICES: [i32; 32] = [
    4, 0, 1, -1,
    4, 1, 5, -1,
    5, 1, 2, -1,
    5, 2, 6, -1,
    6, 2, 3, -1,
    6, 3, 7, -1,
    7, 3, 0, -1,
    7, 0, 4, -1,
];

const ARROW_VERTICES: [[f32; 3]; 18] = [
    // Left tetrahedron
    [-1.0, 0.0, 0.0],
    [-0.666666, 0.166666, 0.166666],
    [-0.666666, -0.166666, 0.166666],
    [-0.666666, -0.166666, -0.166666],
    [-0.666666, 0.166666, -0.166666],
    // Box at center
    [-0.666666, 0.041666, 0.041666],
    [-0.666666, -0.041666, 0.041666],
    [-0.666666, -0.041666, -0.041666],
    [-0.666666, 0.041666, -0.041666],
    [0.666666, 0.041666, 0.041666],
    [0.666666, -0.041666, 0.041666],
    [0.666666, -0.041666, -0.041666],
    [0.666666, 0.041666, -0.041666],
    // Right tetrahedron
    [0.666666, 0.166666, 0.166666],
    [0.666666, 0.166666, -0.166666],
    [0.666666, -0.166666, -0.166666],
    [0.666666, -0.166666, 0.166666],
    [1.0, 0.0, 0.0],
];

#[rustfmt::skip]
const ARROW_INDICES: [i32; 96] = [
    // Left tetrahedron
    1, 0, 2, -1,
    2, 0, 3, -1,
    3, 0, 4, -1,
    4, 0, 1, -1,
    1, 2, 3, -1,
    1, 3, 4, -1,
    // Box
    5, 7, 6, -1, // left face
    5, 8, 7, -1,
    5, 6, 10, -1, // front face
    5, 10, 9, -1,
    6, 7, 11, -1, // bottom face
    6, 11, 10, -1,
    7, 8, 12, -1, // back face
    7, 12, 11, -1,
    8, 5, 9, -1, // top face
    8, 9, 12, -1,
    9, 10, 11, -1, // right face
    9, 11, 12, -1,
    // Right tetrahedron
    13, 14, 15, -1,
    13, 15, 16, -1,
    17, 14, 13, -1,
    17, 15, 14, -1,
    17, 16, 15, -1,
    17, 13, 16, -1,
];

/// Unit cube spanning -1..1 on every axis.
pub fn cube_mesh() -> Arc<TriMesh> {
    static MESH: OnceLock<Arc<TriMesh>> = OnceLock::new();
    MESH.get_or_init(|| Arc::new(build_mesh(&CUBE_VERTICES, &CUBE_INDICES)))
        .clone()
}

/// Unit square in the XY plane, facing +Z.
pub fn square_mesh() -> Arc<TriMesh> {
    static MESH: OnceLock<Arc<TriMesh>> = OnceLock::new();
    MESH.get_or_init(|| Arc::new(build_mesh(&SQUARE_VERTICES, &SQUARE_INDICES)))
        .clone()
}

/// Square picture-frame in the XY plane (outer edge 1, inner edge 0.9).
pub fn hollow_cube_face_mesh() -> Arc<TriMesh> {
    static MESH: OnceLock<Arc<TriMesh>> = OnceLock::new();
    MESH.get_or_init(|| Arc::new(build_mesh(&HOLLOW_FACE_VERTICES, &HOLLOW_FACE_INDICES)))
        .clone()
}

/// Double-headed arrow along the X axis, tips at -1 and 1.
pub fn two_way_arrow_mesh() -> Arc<TriMesh> {
    static MESH: OnceLock<Arc<TriMesh>> = OnceLock::new();
    MESH.get_or_init(|| Arc::new(build_mesh(&ARROW_VERTICES, &ARROW_INDICES)))
        .clone()
}

fn build_mesh(vertices: &[[f32; 3]], indices: &[i32]) -> TriMesh {
    let vertices: Vec<Vec3> = vertices.iter().map(|v| Vec3::from(*v)).collect();
    match faceted_normals(&vertices, indices, true) {
        Ok(faceted) => TriMesh {
            vertices,
            normals: faceted.normals,
            vertex_indices: indices.to_vec(),
            normal_indices: faceted.indices,
        },
        Err(err) => {
            tracing::error!("shape table is malformed: {}", err);
            TriMesh::default()
        }
    }
}
