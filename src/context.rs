use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::Program;
use gl_wrapper::{Capability, ClearMask, DepthFunc, GlApi, VertexArrayId};

use crate::alert::Alert;
use crate::error::SetupError;
use crate::frame::{FrameParams, FrameState, Uniforms, MODEL_VIEW_UNIFORM, PROJECTION_UNIFORM};
use crate::geometry::upload_square;
use crate::shaders::{ShaderBuilder, ShaderProgram};
use crate::source::ShaderSource;

/// Obtains a current GL context from a display surface.
pub trait ContextAcquirer {
    type Gl: GlApi;

    fn acquire(&mut self) -> Result<Self::Gl, SetupError>;
}

/// The context together with everything created on it during setup.
/// Resources live until the process exits.
pub struct RenderContext<G: GlApi> {
    gl: G,
    vertex_array: VertexArrayId,
    program: Program,
    position: u32,
    geometry: Geometry,
    uniforms: Uniforms,
}

impl<G: GlApi> RenderContext<G> {
    pub fn gl(&self) -> &G {
        &self.gl
    }

    /// Vertex array holding the enabled position input; bound for the whole run.
    pub fn vertex_array(&self) -> VertexArrayId {
        self.vertex_array
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn uniforms(&self) -> Uniforms {
        self.uniforms
    }

    pub fn frame_state<'a>(&self, params: &'a FrameParams) -> FrameState<'a> {
        FrameState {
            params,
            buffer: self.geometry.vbo(),
            position: self.position,
            uniforms: self.uniforms,
            vertices: self.geometry.vertices(),
        }
    }
}

/// Fixed pipeline state plus the vertex array that attribute enables and
/// pointers are recorded in. It stays bound, so it must exist before the
/// shader builder enables the position input.
fn init_state<G: GlApi>(gl: &G) -> VertexArrayId {
    gl.clear_color(0.0, 0.0, 0.0, 1.0);
    gl.clear_depth(1.0);
    gl.enable(Capability::DepthTest);
    gl.depth_func(DepthFunc::LessEqual);
    gl.clear(ClearMask::COLOR_DEPTH);

    let vao = gl.create_vertex_array();
    gl.bind_vertex_array(vao);
    vao
}

/// Builds the shader program and uploads the square on an acquired context.
pub fn setup<G: GlApi>(gl: G, source: &dyn ShaderSource) -> Result<RenderContext<G>, SetupError> {
    let vertex_array = init_state(&gl);

    let ShaderProgram { program, position } = ShaderBuilder::new(source).build(&gl)?;
    let geometry = upload_square(&gl)?;

    let uniforms = Uniforms {
        projection: program.uniform(&gl, PROJECTION_UNIFORM),
        model_view: program.uniform(&gl, MODEL_VIEW_UNIFORM),
    };

    if uniforms.projection < 0 {
        tracing::warn!("uniform {PROJECTION_UNIFORM} is not active, uploads will be ignored");
    }
    if uniforms.model_view < 0 {
        tracing::warn!("uniform {MODEL_VIEW_UNIFORM} is not active, uploads will be ignored");
    }

    Ok(RenderContext {
        gl,
        vertex_array,
        program,
        position,
        geometry,
        uniforms,
    })
}

/// Acquires a context and runs setup. Any failure is reported once through
/// `alert` and nothing further is started.
pub fn start<A: ContextAcquirer>(
    acquirer: &mut A,
    source: &dyn ShaderSource,
    alert: &mut dyn Alert,
) -> Option<RenderContext<A::Gl>> {
    let res = acquirer.acquire().and_then(|gl| setup(gl, source));

    match res {
        Ok(context) => Some(context),
        Err(e) => {
            alert.fatal(&e.to_string());
            None
        }
    }
}
