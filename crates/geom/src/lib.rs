mod line;
mod math;
mod normals;
mod plane;
mod plane_uv;
mod sphere;
mod triangle;

pub use line::Line;
pub use math::{perpendicular, rigid_inverse, sign, GeomError};
pub use normals::{faceted_normals, FacetedNormals, MeshIndexError};
pub use plane::Plane;
pub use plane_uv::{PlaneUv, UvHit};
pub use sphere::{BoundingSphere, RayPoint};
pub use triangle::{intersect_ray_triangle, TriangleHit};
