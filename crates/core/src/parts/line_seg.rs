use glam::{Mat4, Vec3};

use crate::parts::PartId;
use crate::render::{DrawCmd, DrawList};

const ENDPOINTS: [Vec3; 2] = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];

const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const DEFAULT_HIGHLIGHT_COLOR: [f32; 3] = [0.8, 0.8, 0.0];

/// A unit line segment from (-1, 0, 0) to (1, 0, 0) under the current
/// transform. Purely decorative: having no surface area it never produces
/// hits.
pub struct LineSegPart {
    id: PartId,
    cur_vertices: [Vec3; 2],
    color: [f32; 3],
    highlight_color: [f32; 3],
    highlighted: bool,
    visible: bool,
}

impl LineSegPart {
    pub fn new(id: PartId) -> Self {
        Self {
            id,
            cur_vertices: ENDPOINTS,
            color: DEFAULT_COLOR,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            highlighted: false,
            visible: true,
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    pub fn set_highlight_color(&mut self, color: [f32; 3]) {
        self.highlight_color = color;
    }

    pub fn render(&self, out: &mut DrawList) {
        if !self.visible {
            return;
        }
        out.push(DrawCmd::Lines {
            points: self.cur_vertices.map(|v| v.to_array()).to_vec(),
            color: if self.highlighted {
                self.highlight_color
            } else {
                self.color
            },
        });
    }

    pub fn set_transform(&mut self, xform: Mat4) {
        self.cur_vertices = ENDPOINTS.map(|v| xform.transform_point3(v));
    }

    pub fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
