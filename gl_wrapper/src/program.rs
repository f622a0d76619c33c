use thiserror::Error;

use crate::api::{GlApi, Location, ProgramId, ShaderId, ShaderStage};

/// Compiled shader stage, not yet part of a program.
#[derive(Debug)]
pub struct Shader {
    id: ShaderId,
}

/// Compiles `source` as `stage`. On failure the shader object is deleted and
/// the compiler log is returned.
pub fn compile<G: GlApi>(gl: &G, stage: ShaderStage, source: &str) -> Result<Shader, PBError> {
    if source.contains('\0') {
        return Err(PBError::Compilation(
            stage,
            "shader source contains a NUL byte".to_owned(),
        ));
    }

    let id = gl.create_shader(stage);
    gl.shader_source(id, source);
    gl.compile_shader(id);

    if !gl.shader_compiled(id) {
        let log = gl.shader_info_log(id);
        gl.delete_shader(id);
        return Err(PBError::Compilation(stage, log));
    }

    tracing::debug!(%stage, shader = id, "compiled shader");

    Ok(Shader { id })
}

#[derive(Default)]
pub struct ProgramBuilder {
    shaders: Vec<Shader>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shaders.push(shader);
        self
    }

    /// Attaches every shader and links. The stage objects are released once
    /// the program holds them.
    pub fn link<G: GlApi>(self, gl: &G) -> Result<Program, PBError> {
        let id = gl.create_program();

        for shader in &self.shaders {
            gl.attach_shader(id, shader.id);
        }

        gl.link_program(id);

        if !gl.program_linked(id) {
            return Err(PBError::Linking(gl.program_info_log(id)));
        }

        for shader in &self.shaders {
            gl.delete_shader(shader.id);
        }

        Ok(Program { id })
    }
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0} shader: {1}")]
    Compilation(ShaderStage, String),
    #[error("{0}")]
    Linking(String),
}

#[derive(Debug)]
pub struct Program {
    id: ProgramId,
}

impl Program {
    pub fn get_id(&self) -> ProgramId {
        self.id
    }

    pub fn activate<G: GlApi>(&self, gl: &G) {
        gl.use_program(self.id);
    }

    /// Location of an active vertex input, `None` if the linker dropped it.
    pub fn attribute<G: GlApi>(&self, gl: &G, name: &str) -> Option<u32> {
        u32::try_from(gl.attrib_location(self.id, name)).ok()
    }

    /// Raw uniform location; `-1` is accepted by GL and silently ignored.
    pub fn uniform<G: GlApi>(&self, gl: &G, name: &str) -> Location {
        gl.uniform_location(self.id, name)
    }
}
