/// One batch of immediate-mode style geometry. The embedder replays these
/// into whatever graphics context is current for the target window; the
/// engine itself never touches graphics state.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Unindexed triangle soup; `positions` and `normals` run in step,
    /// three entries per triangle.
    Triangles {
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        color: [f32; 3],
    },
    /// Line segments; two entries per segment.
    Lines {
        points: Vec<[f32; 3]>,
        color: [f32; 3],
    },
}

/// An ordered list of draw commands produced by one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }
}
