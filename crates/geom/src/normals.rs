use glam::Vec3;

/// Per-triangle flat normals plus an index array using the same winged
/// layout as the vertex indices (three indices and a -1 terminator per
/// triangle), so each triangle references exactly one normal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetedNormals {
    pub normals: Vec<Vec3>,
    pub indices: Vec<i32>,
}

/// Ways a winged index buffer can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshIndexError {
    /// The index count is not a multiple of 4.
    BadLength(usize),
    /// A vertex index points outside the vertex array.
    IndexOutOfRange { offset: usize, index: i32 },
    /// A triangle group is not closed by a -1 terminator.
    MissingTerminator { offset: usize },
}

impl std::fmt::Display for MeshIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshIndexError::BadLength(len) => {
                write!(f, "index count {} is not divisible by 4", len)
            }
            MeshIndexError::IndexOutOfRange { offset, index } => {
                write!(f, "vertex index {} at offset {} is out of range", index, offset)
            }
            MeshIndexError::MissingTerminator { offset } => {
                write!(f, "expected -1 terminator at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for MeshIndexError {}

/// Computes one flat (non-interpolated) normal per triangle of a winged
/// index buffer. `ccw` selects the winding that faces the normal outward.
/// Malformed input is reported as an error and produces no output.
pub fn faceted_normals(
    vertices: &[Vec3],
    indices: &[i32],
    ccw: bool,
) -> Result<FacetedNormals, MeshIndexError> {
    if indices.len() % 4 != 0 {
        return Err(MeshIndexError::BadLength(indices.len()));
    }
    let mut normals = Vec::with_capacity(indices.len() / 4);
    let mut normal_indices = Vec::with_capacity(indices.len());
    for (tri, group) in indices.chunks_exact(4).enumerate() {
        let offset = tri * 4;
        for (slot, &index) in group[..3].iter().enumerate() {
            if index < 0 || index as usize >= vertices.len() {
                return Err(MeshIndexError::IndexOutOfRange {
                    offset: offset + slot,
                    index,
                });
            }
        }
        if group[3] != -1 {
            return Err(MeshIndexError::MissingTerminator { offset: offset + 3 });
        }
        let v0 = vertices[group[0] as usize];
        let v1 = vertices[group[1] as usize];
        let v2 = vertices[group[2] as usize];
        let d1 = v1 - v0;
        let d2 = v2 - v0;
        let normal = if ccw { d1.cross(d2) } else { d2.cross(d1) };
        let idx = normals.len() as i32;
        normals.push(normal.normalize_or_zero());
        normal_indices.extend_from_slice(&[idx, idx, idx, -1]);
    }
    Ok(FacetedNormals {
        normals,
        indices: normal_indices,
    })
}
