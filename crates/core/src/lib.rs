mod camera;
mod hit;
mod manager;
mod manips;
mod parts;
mod registry;
mod render;

pub use camera::{pixel_to_normalized, CameraParameters, FrustumMapping, ScreenToRayMapping};
pub use hit::HitPoint;
pub use manager::{ManagerOptions, ManipManager, MouseButton, WindowId};
pub use manips::{
    HandleBox, ManipKind, Manipulator, Modifiers, MotionCallback, MotionEvent, ObserverId,
    TranslateAxis, TranslatePlane,
};
pub use parts::{
    cube_mesh, hollow_cube_face_mesh, square_mesh, two_way_arrow_mesh, GroupPart, LineSegPart,
    Part, PartId, TriMesh, TriPart,
};
pub use registry::{ManipId, ManipRegistry};
pub use render::{DrawCmd, DrawList};
