pub mod api;
pub mod geometry;
pub mod native;
pub mod program;
pub mod recording;
pub mod renderer;

pub use api::*;
