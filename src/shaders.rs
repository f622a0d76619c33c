use gl_wrapper::program::{self, Program, ProgramBuilder, Shader};
use gl_wrapper::{GlApi, ShaderStage};

use crate::error::SetupError;
use crate::source::ShaderSource;

pub const FRAGMENT_SCRIPT_ID: &str = "shader-fs";
pub const VERTEX_SCRIPT_ID: &str = "shader-vs";
pub const POSITION_ATTRIBUTE: &str = "aVertexPosition";

pub const FRAGMENT_TYPE_TAG: &str = "x-shader/x-fragment";
pub const VERTEX_TYPE_TAG: &str = "x-shader/x-vertex";

pub fn stage_for_type_tag(tag: &str) -> Option<ShaderStage> {
    match tag {
        FRAGMENT_TYPE_TAG => Some(ShaderStage::Fragment),
        VERTEX_TYPE_TAG => Some(ShaderStage::Vertex),
        _ => None,
    }
}

/// Looks up script `id`, picks the stage from its type tag and compiles it.
pub fn load_shader<G: GlApi>(
    gl: &G,
    source: &dyn ShaderSource,
    id: &str,
) -> Result<Shader, SetupError> {
    let script = source
        .script(id)
        .ok_or_else(|| SetupError::ShaderFragmentMissing(id.to_owned()))?;

    let stage =
        stage_for_type_tag(&script.type_tag).ok_or_else(|| SetupError::ShaderKindUnsupported {
            id: id.to_owned(),
            type_tag: script.type_tag.clone(),
        })?;

    Ok(program::compile(gl, stage, &script.text)?)
}

/// Linked and active program with its enabled position input.
#[derive(Debug)]
pub struct ShaderProgram {
    pub program: Program,
    pub position: u32,
}

pub struct ShaderBuilder<'a> {
    source: &'a dyn ShaderSource,
    fragment_id: &'a str,
    vertex_id: &'a str,
    position_attribute: &'a str,
}

impl<'a> ShaderBuilder<'a> {
    pub fn new(source: &'a dyn ShaderSource) -> Self {
        Self {
            source,
            fragment_id: FRAGMENT_SCRIPT_ID,
            vertex_id: VERTEX_SCRIPT_ID,
            position_attribute: POSITION_ATTRIBUTE,
        }
    }

    pub fn with_script_ids(mut self, fragment_id: &'a str, vertex_id: &'a str) -> Self {
        self.fragment_id = fragment_id;
        self.vertex_id = vertex_id;
        self
    }

    /// Compiles both scripts (fragment first), links them and makes the
    /// program current. Nothing becomes current unless every step succeeds.
    pub fn build<G: GlApi>(&self, gl: &G) -> Result<ShaderProgram, SetupError> {
        let fragment = load_shader(gl, self.source, self.fragment_id)?;
        let vertex = load_shader(gl, self.source, self.vertex_id)?;

        let program = ProgramBuilder::new()
            .with_shader(vertex)
            .with_shader(fragment)
            .link(gl)?;

        program.activate(gl);

        let position = program
            .attribute(gl, self.position_attribute)
            .ok_or_else(|| SetupError::AttributeMissing(self.position_attribute.to_owned()))?;
        gl.enable_vertex_attrib_array(position);

        tracing::info!(program = program.get_id(), position, "shader program ready");

        Ok(ShaderProgram { program, position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ShaderDocument;
    use gl_wrapper::recording::{GlCall, RecordingGl};

    fn document() -> ShaderDocument {
        ShaderDocument::default()
            .with_script(FRAGMENT_SCRIPT_ID, FRAGMENT_TYPE_TAG, "frag")
            .with_script(VERTEX_SCRIPT_ID, VERTEX_TYPE_TAG, "vert")
    }

    #[test]
    fn type_tags() {
        assert_eq!(stage_for_type_tag("x-shader/x-vertex"), Some(ShaderStage::Vertex));
        assert_eq!(stage_for_type_tag("x-shader/x-fragment"), Some(ShaderStage::Fragment));
        assert_eq!(stage_for_type_tag("text/javascript"), None);
    }

    #[test]
    fn fragment_compiles_first() {
        let gl = RecordingGl::new();
        let doc = document();

        ShaderBuilder::new(&doc).build(&gl).unwrap();

        let stages: Vec<ShaderStage> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::CreateShader(stage, _) => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(stages, vec![ShaderStage::Fragment, ShaderStage::Vertex]);
    }

    #[test]
    fn enables_position_of_active_program() {
        let gl = RecordingGl::new();
        let doc = document();

        let built = ShaderBuilder::new(&doc).build(&gl).unwrap();

        assert_eq!(gl.active_program(), Some(built.program.get_id()));
        assert_eq!(
            gl.calls().last(),
            Some(&GlCall::EnableVertexAttribArray(built.position))
        );
    }

    #[test]
    fn unsupported_type_tag_aborts() {
        let gl = RecordingGl::new();
        let doc = document().with_script(VERTEX_SCRIPT_ID, "text/plain", "vert");

        let err = ShaderBuilder::new(&doc).build(&gl).unwrap_err();

        assert!(matches!(
            err,
            SetupError::ShaderKindUnsupported { ref id, ref type_tag }
                if id == VERTEX_SCRIPT_ID && type_tag == "text/plain"
        ));
        assert_eq!(gl.active_program(), None);
    }

    #[test]
    fn missing_position_input() {
        let gl = RecordingGl::new().without_name(POSITION_ATTRIBUTE);
        let doc = document();

        let err = ShaderBuilder::new(&doc).build(&gl).unwrap_err();

        assert!(matches!(err, SetupError::AttributeMissing(_)));
        assert_eq!(gl.count_calls(|c| matches!(c, GlCall::EnableVertexAttribArray(_))), 0);
    }

    #[test]
    fn custom_script_ids() {
        let gl = RecordingGl::new();
        let doc = ShaderDocument::default()
            .with_script("f", FRAGMENT_TYPE_TAG, "frag")
            .with_script("v", VERTEX_TYPE_TAG, "vert");

        assert!(ShaderBuilder::new(&doc)
            .with_script_ids("f", "v")
            .build(&gl)
            .is_ok());
    }
}
