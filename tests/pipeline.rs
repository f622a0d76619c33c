use std::time::{Duration, Instant};

use gl_wrapper::recording::{GlCall, RecordingGl};
use gl_wrapper::{BufferTarget, Primitive, ShaderStage};

use glsquare::frame::FrameParams;
use glsquare::geometry::SQUARE_VERTICES;
use glsquare::math::Mat4;
use glsquare::scheduler::RenderLoop;
use glsquare::shaders::{FRAGMENT_SCRIPT_ID, FRAGMENT_TYPE_TAG, VERTEX_SCRIPT_ID, VERTEX_TYPE_TAG};
use glsquare::source::ShaderDocument;
use glsquare::{ContextAcquirer, SetupError};

const PERIOD: Duration = Duration::from_millis(15);

struct Acquirer(Option<RecordingGl>);

impl ContextAcquirer for Acquirer {
    type Gl = RecordingGl;

    fn acquire(&mut self) -> Result<RecordingGl, SetupError> {
        self.0
            .take()
            .ok_or_else(|| SetupError::ContextUnavailable("no compatible context".to_owned()))
    }
}

fn document() -> ShaderDocument {
    ShaderDocument::builtin().unwrap()
}

fn is_shader_or_geometry(call: &GlCall) -> bool {
    matches!(
        call,
        GlCall::CreateShader(..)
            | GlCall::CreateProgram(_)
            | GlCall::CreateBuffer(_)
            | GlCall::BufferData(..)
    )
}

#[test]
fn context_failure_stops_everything() {
    let mut alerts: Vec<String> = Vec::new();

    let context = glsquare::start(&mut Acquirer(None), &document(), &mut alerts);

    assert!(context.is_none());
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("no compatible context"));
}

#[test]
fn one_draw_per_tick() {
    let mut alerts: Vec<String> = Vec::new();
    let context = glsquare::start(
        &mut Acquirer(Some(RecordingGl::new())),
        &document(),
        &mut alerts,
    )
    .unwrap();
    assert!(alerts.is_empty());

    let buffer = context.geometry().vbo();
    context.gl().take_calls();

    let start = Instant::now();
    let mut render_loop = RenderLoop::new(context, FrameParams::default(), PERIOD, start);

    for i in 1..=5 {
        assert!(render_loop.poll(start + PERIOD * i));
        assert!(!render_loop.poll(start + PERIOD * i));
    }

    let calls = render_loop.context().gl().calls();
    let draws: Vec<&GlCall> = calls
        .iter()
        .filter(|c| matches!(c, GlCall::DrawArrays(..)))
        .collect();

    assert_eq!(render_loop.frames(), 5);
    assert_eq!(draws.len(), 5);
    assert!(draws
        .iter()
        .all(|c| **c == GlCall::DrawArrays(Primitive::TriangleStrip, 0, 4)));
    assert!(calls.iter().all(|c| match c {
        GlCall::BindBuffer(BufferTarget::Array, b) => *b == buffer,
        _ => true,
    }));
    assert!(!calls.iter().any(is_shader_or_geometry));
    assert!(!calls.iter().any(|c| matches!(c, GlCall::UseProgram(_))));
}

#[test]
fn draws_read_position_from_enabled_array() {
    let context = glsquare::setup(RecordingGl::new(), &document()).unwrap();
    let position = context.position();
    let vao = context.vertex_array();
    context.gl().take_calls();

    let start = Instant::now();
    let mut render_loop = RenderLoop::new(context, FrameParams::default(), PERIOD, start);
    render_loop.render_frame();

    let gl = render_loop.context().gl();
    assert!(!gl
        .calls()
        .iter()
        .any(|c| matches!(c, GlCall::BindVertexArray(_))));
    assert_eq!(gl.bound_vertex_array(), vao);
    assert!(gl.attrib_enabled(vao, position));
}

#[test]
fn frame_uploads_fixed_matrices() {
    let context = glsquare::setup(RecordingGl::new(), &document()).unwrap();
    let uniforms = context.uniforms();
    context.gl().take_calls();

    let start = Instant::now();
    let mut render_loop = RenderLoop::new(context, FrameParams::default(), PERIOD, start);
    render_loop.render_frame();
    render_loop.render_frame();

    let uploads: Vec<(i32, [f32; 16])> = render_loop
        .context()
        .gl()
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            GlCall::UniformMatrix4 {
                location,
                transpose: false,
                value,
            } => Some((location, value)),
            _ => None,
        })
        .collect();

    let projection = Mat4::perspective(45.0, 640.0 / 480.0, 0.1, 100.0).to_gl();
    let model_view = Mat4::translation(0.0, 0.0, -6.0).to_gl();

    assert_eq!(
        uploads,
        vec![
            (uniforms.projection, projection),
            (uniforms.model_view, model_view),
            (uniforms.projection, projection),
            (uniforms.model_view, model_view),
        ]
    );
}

#[test]
fn missing_fragment_script_halts_before_geometry() {
    let doc = ShaderDocument::default().with_script(VERTEX_SCRIPT_ID, VERTEX_TYPE_TAG, "vert");
    let mut alerts: Vec<String> = Vec::new();
    let gl = RecordingGl::new();

    let res = glsquare::setup(gl.clone(), &doc);

    assert!(matches!(res, Err(SetupError::ShaderFragmentMissing(ref id)) if id == FRAGMENT_SCRIPT_ID));
    assert!(!gl.calls().iter().any(is_shader_or_geometry));
    assert_eq!(gl.active_program(), None);

    let gl = RecordingGl::new();
    let context = glsquare::start(&mut Acquirer(Some(gl.clone())), &doc, &mut alerts);
    assert!(context.is_none());
    assert_eq!(alerts, vec!["Shader script `shader-fs` not found".to_owned()]);
    assert!(!gl.calls().iter().any(is_shader_or_geometry));
}

#[test]
fn compile_error_reports_compiler_log() {
    let doc = ShaderDocument::default()
        .with_script(FRAGMENT_SCRIPT_ID, FRAGMENT_TYPE_TAG, "void main() { oops }")
        .with_script(VERTEX_SCRIPT_ID, VERTEX_TYPE_TAG, "vert");
    let gl = RecordingGl::new().failing_compile(
        ShaderStage::Fragment,
        "0:1(15): error: syntax error, unexpected '}'",
    );
    let mut alerts: Vec<String> = Vec::new();

    let context = glsquare::start(&mut Acquirer(Some(gl.clone())), &doc, &mut alerts);

    assert!(context.is_none());
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("fragment"));
    assert!(alerts[0].contains("syntax error, unexpected '}'"));
    assert_eq!(gl.active_program(), None);
    assert_eq!(gl.count_calls(|c| matches!(c, GlCall::UseProgram(_))), 0);
    assert_eq!(gl.count_calls(|c| matches!(c, GlCall::CreateBuffer(_))), 0);
}

#[test]
fn vertex_compile_error_carries_stage() {
    let doc = document();
    let gl = RecordingGl::new().failing_compile(ShaderStage::Vertex, "bad");

    let res = glsquare::setup(gl.clone(), &doc);

    match res {
        Err(SetupError::ShaderCompileFailure { stage, log }) => {
            assert_eq!(stage, ShaderStage::Vertex);
            assert_eq!(log, "bad");
        }
        _ => panic!("expected compile failure"),
    }
    assert_eq!(gl.active_program(), None);
}

#[test]
fn link_error_is_reported() {
    let gl = RecordingGl::new().failing_link("error: vertex shader lacks `main'");
    let mut alerts: Vec<String> = Vec::new();

    let context = glsquare::start(&mut Acquirer(Some(gl.clone())), &document(), &mut alerts);

    assert!(context.is_none());
    assert_eq!(gl.active_program(), None);
    assert_eq!(
        alerts,
        vec!["Unable to initialize the shader program: error: vertex shader lacks `main'".to_owned()]
    );
}

#[test]
fn setup_uploads_one_static_square() {
    let context = glsquare::setup(RecordingGl::new(), &document()).unwrap();
    let gl = context.gl();

    assert_eq!(gl.count_calls(|c| matches!(c, GlCall::CreateBuffer(_))), 1);
    assert_eq!(gl.count_calls(|c| matches!(c, GlCall::CreateProgram(_))), 1);
    assert_eq!(
        gl.buffer_contents(context.geometry().vbo()).unwrap(),
        SQUARE_VERTICES
    );
    assert_eq!(gl.active_program(), Some(context.program().get_id()));
    assert!(context.position() < 16);
}
