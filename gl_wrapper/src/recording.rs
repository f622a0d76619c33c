//! In-process [`GlApi`] that records every state-changing call.
//!
//! Query calls (locations, status, logs) are answered from the recorded
//! state and are not logged. Failures can be scripted per stage so the
//! whole setup path can run without a display.
//!
//! Clones share one recorded state, so a clone kept by the caller still
//! sees the calls made after the original was moved away.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::api::*;

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    ClearColor([f32; 4]),
    ClearDepth(f64),
    Enable(Capability),
    DepthFunc(DepthFunc),
    Clear(ClearMask),
    CreateShader(ShaderStage, ShaderId),
    ShaderSource(ShaderId, String),
    CompileShader(ShaderId),
    DeleteShader(ShaderId),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    LinkProgram(ProgramId),
    UseProgram(ProgramId),
    EnableVertexAttribArray(u32),
    CreateVertexArray(VertexArrayId),
    BindVertexArray(VertexArrayId),
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, BufferId),
    BufferData(BufferTarget, Vec<f32>, BufferUsage),
    VertexAttribPointer {
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    },
    UniformMatrix4 {
        location: Location,
        transpose: bool,
        value: [f32; 16],
    },
    DrawArrays(Primitive, i32, i32),
}

#[derive(Default)]
struct State {
    calls: Vec<GlCall>,
    next_id: u32,
    shader_stages: HashMap<ShaderId, ShaderStage>,
    compiled: HashMap<ShaderId, bool>,
    linked: HashMap<ProgramId, bool>,
    locations: HashMap<(ProgramId, String), Location>,
    next_location: Location,
    bound_array_buffer: BufferId,
    bound_vertex_array: VertexArrayId,
    enabled_attribs: HashSet<(VertexArrayId, u32)>,
    buffers: HashMap<BufferId, Vec<f32>>,
    active_program: Option<ProgramId>,

    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
    missing_names: HashSet<String>,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn location(&mut self, program: ProgramId, name: &str) -> Location {
        if self.missing_names.contains(name) || self.linked.get(&program) != Some(&true) {
            return -1;
        }

        let next = &mut self.next_location;
        *self
            .locations
            .entry((program, name.to_owned()))
            .or_insert_with(|| {
                let location = *next;
                *next += 1;
                location
            })
    }
}

#[derive(Default, Clone)]
pub struct RecordingGl {
    state: Rc<RefCell<State>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every shader of `stage` fails to compile with `log`.
    pub fn failing_compile(self, stage: ShaderStage, log: impl Into<String>) -> Self {
        self.state
            .borrow_mut()
            .compile_failures
            .insert(stage, log.into());
        self
    }

    /// Every program fails to link with `log`.
    pub fn failing_link(self, log: impl Into<String>) -> Self {
        self.state.borrow_mut().link_failure = Some(log.into());
        self
    }

    /// Attribute and uniform lookups for `name` report `-1`.
    pub fn without_name(self, name: impl Into<String>) -> Self {
        self.state.borrow_mut().missing_names.insert(name.into());
        self
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    pub fn count_calls(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn active_program(&self) -> Option<ProgramId> {
        self.state.borrow().active_program
    }

    pub fn bound_vertex_array(&self) -> VertexArrayId {
        self.state.borrow().bound_vertex_array
    }

    /// Whether `index` is enabled on `vao`. Enabling with no vertex array
    /// bound is an error in a core profile and leaves nothing enabled.
    pub fn attrib_enabled(&self, vao: VertexArrayId, index: u32) -> bool {
        self.state.borrow().enabled_attribs.contains(&(vao, index))
    }

    pub fn buffer_contents(&self, buffer: BufferId) -> Option<Vec<f32>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for RecordingGl {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor([r, g, b, a]));
    }

    fn clear_depth(&self, depth: f64) {
        self.record(GlCall::ClearDepth(depth));
    }

    fn enable(&self, cap: Capability) {
        self.record(GlCall::Enable(cap));
    }

    fn depth_func(&self, func: DepthFunc) {
        self.record(GlCall::DepthFunc(func));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(GlCall::Clear(mask));
    }

    fn create_shader(&self, stage: ShaderStage) -> ShaderId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.shader_stages.insert(id, stage);
        state.calls.push(GlCall::CreateShader(stage, id));
        id
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.record(GlCall::ShaderSource(shader, source.to_owned()));
    }

    fn compile_shader(&self, shader: ShaderId) {
        let mut state = self.state.borrow_mut();
        let ok = match state.shader_stages.get(&shader) {
            Some(stage) => !state.compile_failures.contains_key(stage),
            None => false,
        };
        state.compiled.insert(shader, ok);
        state.calls.push(GlCall::CompileShader(shader));
    }

    fn shader_compiled(&self, shader: ShaderId) -> bool {
        self.state.borrow().compiled.get(&shader) == Some(&true)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let state = self.state.borrow();
        state
            .shader_stages
            .get(&shader)
            .and_then(|stage| state.compile_failures.get(stage))
            .cloned()
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> ProgramId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.calls.push(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GlCall::AttachShader(program, shader));
    }

    fn link_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        let attached: Vec<ShaderId> = state
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::AttachShader(p, s) if *p == program => Some(*s),
                _ => None,
            })
            .collect();

        let stages_ok = [ShaderStage::Vertex, ShaderStage::Fragment]
            .iter()
            .all(|stage| {
                attached.iter().any(|s| {
                    state.shader_stages.get(s) == Some(stage)
                        && state.compiled.get(s) == Some(&true)
                })
            });

        let ok = stages_ok && state.link_failure.is_none();
        state.linked.insert(program, ok);
        state.calls.push(GlCall::LinkProgram(program));
    }

    fn program_linked(&self, program: ProgramId) -> bool {
        self.state.borrow().linked.get(&program) == Some(&true)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        let state = self.state.borrow();
        if state.linked.get(&program) == Some(&true) {
            return String::new();
        }

        state
            .link_failure
            .clone()
            .unwrap_or_else(|| "vertex and fragment shaders must both be compiled".to_owned())
    }

    fn use_program(&self, program: ProgramId) {
        let mut state = self.state.borrow_mut();
        state.active_program = Some(program);
        state.calls.push(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Location {
        self.state.borrow_mut().location(program, name)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Location {
        self.state.borrow_mut().location(program, name)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        let mut state = self.state.borrow_mut();
        let vao = state.bound_vertex_array;
        if vao != 0 {
            state.enabled_attribs.insert((vao, index));
        }
        state.calls.push(GlCall::EnableVertexAttribArray(index));
    }

    fn create_vertex_array(&self) -> VertexArrayId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.calls.push(GlCall::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: VertexArrayId) {
        let mut state = self.state.borrow_mut();
        state.bound_vertex_array = vao;
        state.calls.push(GlCall::BindVertexArray(vao));
    }

    fn create_buffer(&self) -> BufferId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.calls.push(GlCall::CreateBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: BufferId) {
        let mut state = self.state.borrow_mut();
        state.bound_array_buffer = buffer;
        state.calls.push(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[f32], usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        let bound = state.bound_array_buffer;
        state.buffers.insert(bound, data.to_vec());
        state
            .calls
            .push(GlCall::BufferData(target, data.to_vec(), usage));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        self.record(GlCall::VertexAttribPointer {
            index,
            size,
            normalized,
            stride,
            offset,
        });
    }

    fn uniform_matrix4(&self, location: Location, transpose: bool, value: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4 {
            location,
            transpose,
            value: *value,
        });
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(GlCall::DrawArrays(mode, first, count));
    }
}
