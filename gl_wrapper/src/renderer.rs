use crate::api::{BufferId, BufferTarget, ClearMask, GlApi, Location, Primitive, ProgramId};
use crate::program::Program;

/// One GL command of a frame. A frame is a plain list of these, so it can be
/// built without a context and inspected before it is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(ClearMask),
    BindBuffer(BufferTarget, BufferId),
    /// Tightly packed float attribute read from the bound array buffer.
    AttribPointer {
        index: u32,
        size: i32,
        offset: usize,
    },
    /// Column-major 4x4 matrix.
    UniformMatrix4 { location: Location, value: [f32; 16] },
    DrawArrays {
        mode: Primitive,
        first: i32,
        count: i32,
    },
}

pub struct GlRenderer {
    current_program: ProgramId,
}

impl GlRenderer {
    /// `current_program` is the program already in use on the context.
    pub fn new(current_program: ProgramId) -> Self {
        Self { current_program }
    }

    pub fn execute<G: GlApi>(&mut self, gl: &G, program: &Program, commands: &[DrawCommand]) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            program.activate(gl);
            self.current_program = p_id;
        }

        for command in commands {
            match command {
                DrawCommand::Clear(mask) => gl.clear(*mask),
                DrawCommand::BindBuffer(target, buffer) => gl.bind_buffer(*target, *buffer),
                DrawCommand::AttribPointer {
                    index,
                    size,
                    offset,
                } => gl.vertex_attrib_pointer(*index, *size, false, 0, *offset),
                DrawCommand::UniformMatrix4 { location, value } => {
                    gl.uniform_matrix4(*location, false, value)
                }
                DrawCommand::DrawArrays { mode, first, count } => {
                    gl.draw_arrays(*mode, *first, *count)
                }
            }
        }
    }
}
