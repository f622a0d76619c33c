use gl_wrapper::renderer::DrawCommand;
use gl_wrapper::{BufferId, BufferTarget, ClearMask, Location, Primitive};

use crate::math::Mat4;

pub const PROJECTION_UNIFORM: &str = "uPMatrix";
pub const MODEL_VIEW_UNIFORM: &str = "uMVMatrix";

pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45.0,
            aspect: CANVAS_WIDTH as f64 / CANVAS_HEIGHT as f64,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Parameters that stay fixed for every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub projection: Projection,
    pub model_offset: [f64; 3],
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            model_offset: [0.0, 0.0, -6.0],
        }
    }
}

impl FrameParams {
    /// Identity followed by the model offset. Built from scratch on every
    /// call, so nothing carries over between frames.
    pub fn model_view(&self) -> Mat4 {
        let [x, y, z] = self.model_offset;
        Mat4::identity() * Mat4::translation(x, y, z)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Uniforms {
    pub projection: Location,
    pub model_view: Location,
}

/// Everything a frame needs, resolved during setup.
#[derive(Debug, Copy, Clone)]
pub struct FrameState<'a> {
    pub params: &'a FrameParams,
    pub buffer: BufferId,
    pub position: u32,
    pub uniforms: Uniforms,
    pub vertices: usize,
}

/// Commands for one frame of the square.
pub fn render(state: &FrameState) -> Vec<DrawCommand> {
    let projection = state.params.projection.matrix();
    let model_view = state.params.model_view();

    vec![
        DrawCommand::Clear(ClearMask::COLOR_DEPTH),
        DrawCommand::BindBuffer(BufferTarget::Array, state.buffer),
        DrawCommand::AttribPointer {
            index: state.position,
            size: 3,
            offset: 0,
        },
        DrawCommand::UniformMatrix4 {
            location: state.uniforms.projection,
            value: projection.to_gl(),
        },
        DrawCommand::UniformMatrix4 {
            location: state.uniforms.model_view,
            value: model_view.to_gl(),
        },
        DrawCommand::DrawArrays {
            mode: Primitive::TriangleStrip,
            first: 0,
            count: state.vertices as i32,
        },
    ]
}
