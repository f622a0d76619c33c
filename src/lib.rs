//! Renders a single white square through a fixed perspective camera.
//!
//! Setup runs once: acquire a context, build the shader program from named
//! scripts, upload the square. Afterwards [`scheduler::RenderLoop`] redraws
//! the same frame on a fixed interval.

pub mod alert;
pub mod context;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod scheduler;
pub mod shaders;
pub mod source;

pub use context::{setup, start, ContextAcquirer, RenderContext};
pub use error::SetupError;
