use thiserror::Error;

use crate::api::{BufferId, BufferTarget, BufferUsage, GlApi};

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Uploads the data into a single static array buffer, leaving it bound.
    ///
    /// Attribute state belongs to the vertex array bound by the caller;
    /// pointers are declared against the bound buffer every frame.
    pub fn build<G: GlApi>(self, gl: &G) -> Result<Geometry, GBError> {
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        if total_len == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.is_empty() || self.data.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vbo = gl.create_buffer();
        gl.bind_buffer(BufferTarget::Array, vbo);
        gl.buffer_data(BufferTarget::Array, self.data, BufferUsage::StaticDraw);

        let vertices = self.data.len() / total_len;

        tracing::debug!(buffer = vbo, vertices, "uploaded vertex buffer");

        Ok(Geometry { vbo, vertices })
    }
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Geometry needs at least one attribute")]
    NoAttributes,
}

#[derive(Debug, Copy, Clone)]
pub enum VertexAttribute {
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Vec3 => 3,
        }
    }
}

#[derive(Debug)]
pub struct Geometry {
    vbo: BufferId,
    vertices: usize,
}

impl Geometry {
    pub fn vbo(&self) -> BufferId {
        self.vbo
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{GlCall, RecordingGl};

    #[test]
    fn rejects_partial_vertex() {
        let gl = RecordingGl::new();
        let res = GeometryBuilder::new(&[0.0; 7])
            .with_attribute(VertexAttribute::Vec3)
            .build(&gl);

        assert!(matches!(res, Err(GBError::InvalidDataLength)));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn rejects_missing_attributes() {
        let gl = RecordingGl::new();

        assert!(matches!(
            GeometryBuilder::new(&[0.0; 3]).build(&gl),
            Err(GBError::NoAttributes)
        ));
    }

    #[test]
    fn single_static_buffer() {
        let gl = RecordingGl::new();
        let geometry = GeometryBuilder::new(&[0.0; 9])
            .with_attribute(VertexAttribute::Vec3)
            .build(&gl)
            .unwrap();

        assert_eq!(geometry.vertices(), 3);
        assert_eq!(
            gl.calls(),
            vec![
                GlCall::CreateBuffer(geometry.vbo()),
                GlCall::BindBuffer(BufferTarget::Array, geometry.vbo()),
                GlCall::BufferData(BufferTarget::Array, vec![0.0; 9], BufferUsage::StaticDraw),
            ]
        );
    }
}
