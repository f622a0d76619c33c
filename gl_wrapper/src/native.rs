use std::ffi::{c_char, c_void, CString};

use gl::types::{GLenum, GLint, GLsizei};

use crate::api::*;

/// [`GlApi`] over the global function pointers of the `gl` crate.
///
/// Only one instance should exist per loaded context; all calls are
/// forwarded to whatever context is current on the thread.
pub struct NativeGl {
    _loaded: (),
}

impl NativeGl {
    /// Loads GL entry points through `loader`. Returns `None` when the
    /// entry points required by the renderer could not be resolved.
    pub fn load_with<F>(loader: F) -> Option<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let loaded = gl::CreateShader::is_loaded()
            && gl::CreateProgram::is_loaded()
            && gl::GenBuffers::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::DrawArrays::is_loaded();

        if loaded {
            Some(Self { _loaded: () })
        } else {
            None
        }
    }
}

fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
    }
}

fn gl_bool(value: bool) -> u8 {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

fn trim_log(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);

    if let Some(nul) = buf.iter().position(|b| *b == 0) {
        buf.truncate(nul);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

impl GlApi for NativeGl {
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear_depth(&self, depth: f64) {
        unsafe { gl::ClearDepth(depth) }
    }

    fn enable(&self, cap: Capability) {
        let cap = match cap {
            Capability::DepthTest => gl::DEPTH_TEST,
        };

        unsafe { gl::Enable(cap) }
    }

    fn depth_func(&self, func: DepthFunc) {
        let func = match func {
            DepthFunc::LessEqual => gl::LEQUAL,
        };

        unsafe { gl::DepthFunc(func) }
    }

    fn clear(&self, mask: ClearMask) {
        let mut bits = 0;
        if mask.color {
            bits |= gl::COLOR_BUFFER_BIT;
        }
        if mask.depth {
            bits |= gl::DEPTH_BUFFER_BIT;
        }

        unsafe { gl::Clear(bits) }
    }

    fn create_shader(&self, stage: ShaderStage) -> ShaderId {
        unsafe { gl::CreateShader(stage_enum(stage)) }
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        // callers reject sources with interior NUL before getting here
        let source = CString::new(source).unwrap_or_default();

        unsafe {
            gl::ShaderSource(
                shader,
                1,
                (&source.as_ptr()) as *const *const c_char,
                std::ptr::null(),
            );
        }
    }

    fn compile_shader(&self, shader: ShaderId) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compiled(&self, shader: ShaderId) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let mut len: GLint = 0;
        let mut written: GLsizei = 0;

        unsafe {
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);
            let mut buf = vec![0_u8; len.max(1) as usize];
            gl::GetShaderInfoLog(
                shader,
                buf.len() as GLsizei,
                (&mut written) as *mut GLsizei,
                buf.as_mut_ptr() as *mut c_char,
            );
            trim_log(buf, written)
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> ProgramId {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: ProgramId) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_linked(&self, program: ProgramId) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        let mut len: GLint = 0;
        let mut written: GLsizei = 0;

        unsafe {
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);
            let mut buf = vec![0_u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                buf.len() as GLsizei,
                (&mut written) as *mut GLsizei,
                buf.as_mut_ptr() as *mut c_char,
            );
            trim_log(buf, written)
        }
    }

    fn use_program(&self, program: ProgramId) {
        unsafe { gl::UseProgram(program) }
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Location {
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetAttribLocation(program, name.as_ptr()) },
            Err(_) => -1,
        }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Location {
        match CString::new(name) {
            Ok(name) => unsafe { gl::GetUniformLocation(program, name.as_ptr()) },
            Err(_) => -1,
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn create_vertex_array(&self) -> VertexArrayId {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, (&mut vao) as *mut u32) };
        vao
    }

    fn bind_vertex_array(&self, vao: VertexArrayId) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn create_buffer(&self) -> BufferId {
        let mut vbo = 0;
        unsafe { gl::GenBuffers(1, (&mut vbo) as *mut u32) };
        vbo
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: BufferId) {
        unsafe { gl::BindBuffer(target_enum(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[f32], usage: BufferUsage) {
        let usage = match usage {
            BufferUsage::StaticDraw => gl::STATIC_DRAW,
        };

        unsafe {
            gl::BufferData(
                target_enum(target),
                std::mem::size_of_val(data) as isize,
                data.as_ptr() as *const c_void,
                usage,
            );
        }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                size,
                gl::FLOAT,
                gl_bool(normalized),
                stride,
                offset as *const c_void,
            );
        }
    }

    fn uniform_matrix4(&self, location: Location, transpose: bool, value: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl_bool(transpose), value.as_ptr()) }
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        let mode = match mode {
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
        };

        unsafe { gl::DrawArrays(mode, first, count) }
    }
}
