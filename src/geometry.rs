use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::GlApi;

use crate::error::SetupError;

/// Unit square in the XY plane, ordered for a triangle strip so the two
/// triangles share the (+1,-1)/(-1,+1) diagonal.
#[rustfmt::skip]
pub const SQUARE_VERTICES: [f32; 12] = [
     1.0,  1.0, 0.0,
    -1.0,  1.0, 0.0,
     1.0, -1.0, 0.0,
    -1.0, -1.0, 0.0,
];

pub const SQUARE_VERTEX_COUNT: usize = 4;

/// Uploads [`SQUARE_VERTICES`] into one static array buffer.
pub fn upload_square<G: GlApi>(gl: &G) -> Result<Geometry, SetupError> {
    let geometry = GeometryBuilder::new(&SQUARE_VERTICES)
        .with_attribute(VertexAttribute::Vec3)
        .build(gl)?;

    Ok(geometry)
}
