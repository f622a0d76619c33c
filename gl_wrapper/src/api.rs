use std::fmt::{Display, Formatter};

pub type ShaderId = u32;
pub type ProgramId = u32;
pub type BufferId = u32;
pub type VertexArrayId = u32;

/// Raw location as returned by GL, `-1` when the name is not active.
pub type Location = i32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DepthFunc {
    LessEqual,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR_DEPTH: Self = Self {
        color: true,
        depth: true,
    };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    StaticDraw,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

/// The slice of GL that the renderer issues. Every call goes to the
/// context that is current on the calling thread.
pub trait GlApi {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&self, depth: f64);
    fn enable(&self, cap: Capability);
    fn depth_func(&self, func: DepthFunc);
    fn clear(&self, mask: ClearMask);

    fn create_shader(&self, stage: ShaderStage) -> ShaderId;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compiled(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> ProgramId;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_linked(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn use_program(&self, program: ProgramId);

    fn attrib_location(&self, program: ProgramId, name: &str) -> Location;
    fn uniform_location(&self, program: ProgramId, name: &str) -> Location;
    fn enable_vertex_attrib_array(&self, index: u32);

    fn create_vertex_array(&self) -> VertexArrayId;
    fn bind_vertex_array(&self, vao: VertexArrayId);
    fn create_buffer(&self) -> BufferId;
    fn bind_buffer(&self, target: BufferTarget, buffer: BufferId);
    fn buffer_data(&self, target: BufferTarget, data: &[f32], usage: BufferUsage);

    /// Declares float components for `index` read from the bound array buffer.
    /// `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    );
    fn uniform_matrix4(&self, location: Location, transpose: bool, value: &[f32; 16]);
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
}
