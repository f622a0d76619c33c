use gl_wrapper::geometry::GBError;
use gl_wrapper::program::PBError;
use gl_wrapper::ShaderStage;
use thiserror::Error;

/// Everything that stops the pipeline before the first frame.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Unable to initialize OpenGL: {0}")]
    ContextUnavailable(String),
    #[error("Shader script `{0}` not found")]
    ShaderFragmentMissing(String),
    #[error("Shader script `{id}` has unsupported type `{type_tag}`")]
    ShaderKindUnsupported { id: String, type_tag: String },
    #[error("An error occurred compiling the {stage} shader: {log}")]
    ShaderCompileFailure { stage: ShaderStage, log: String },
    #[error("Unable to initialize the shader program: {0}")]
    ProgramLinkFailure(String),
    #[error("Vertex input `{0}` is not active in the shader program")]
    AttributeMissing(String),
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GBError),
}

impl From<PBError> for SetupError {
    fn from(e: PBError) -> Self {
        match e {
            PBError::Compilation(stage, log) => SetupError::ShaderCompileFailure { stage, log },
            PBError::Linking(log) => SetupError::ProgramLinkFailure(log),
        }
    }
}
