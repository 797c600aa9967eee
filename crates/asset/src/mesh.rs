//! Interleaved, renderer-ready vertex buffers.

/// Attribute layout of one emitted vertex. Attributes always appear in the
/// order position, color, uv, normal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    /// position(3) + color(3)
    PositionColor,
    /// position(3) + color(3) + uv(2)
    PositionColorUv,
    /// position(3) + color(3) + uv(2) + normal(3)
    PositionColorUvNormal,
}

impl VertexLayout {
    /// Number of `f32` values per vertex.
    pub const fn stride(self) -> usize {
        match self {
            VertexLayout::PositionColor => 6,
            VertexLayout::PositionColorUv => 8,
            VertexLayout::PositionColorUvNormal => 11,
        }
    }

    pub const fn has_uv(self) -> bool {
        !matches!(self, VertexLayout::PositionColor)
    }

    pub const fn has_normal(self) -> bool {
        matches!(self, VertexLayout::PositionColorUvNormal)
    }

    /// Stride in bytes, as a GPU vertex attribute description wants it.
    pub const fn byte_stride(self) -> usize {
        self.stride() * std::mem::size_of::<f32>()
    }
}

/// Flat sequence of interleaved vertex attributes.
///
/// The length is always a multiple of the layout's stride.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
    layout: VertexLayout,
    data: Vec<f32>,
}

impl VertexBuffer {
    pub fn new(layout: VertexLayout) -> Self {
        Self {
            layout,
            data: Vec::new(),
        }
    }

    pub fn with_capacity(layout: VertexLayout, vertices: usize) -> Self {
        Self {
            layout,
            data: Vec::with_capacity(vertices * layout.stride()),
        }
    }

    /// Append one vertex. Attributes the layout does not carry are dropped.
    pub fn push_vertex(
        &mut self,
        position: [f32; 3],
        color: [f32; 3],
        uv: [f32; 2],
        normal: [f32; 3],
    ) {
        self.data.extend_from_slice(&position);
        self.data.extend_from_slice(&color);
        if self.layout.has_uv() {
            self.data.extend_from_slice(&uv);
        }
        if self.layout.has_normal() {
            self.data.extend_from_slice(&normal);
        }
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    /// Number of vertices to pass to a draw call.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Iterate over vertices, one stride-sized slice each.
    pub fn vertices(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.stride())
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_match_layouts() {
        assert_eq!(VertexLayout::PositionColor.stride(), 6);
        assert_eq!(VertexLayout::PositionColorUv.stride(), 8);
        assert_eq!(VertexLayout::PositionColorUvNormal.stride(), 11);
        assert_eq!(VertexLayout::PositionColorUvNormal.byte_stride(), 44);
    }

    #[test]
    fn push_vertex_drops_unused_attributes() {
        let mut buf = VertexBuffer::new(VertexLayout::PositionColorUv);
        buf.push_vertex([1.0, 2.0, 3.0], [0.5; 3], [0.25, 0.75], [9.0; 3]);
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 0.5, 0.5, 0.5, 0.25, 0.75]);
        assert_eq!(buf.vertex_count(), 1);
        assert_eq!(buf.as_bytes().len(), 8 * 4);
        assert_eq!(buf.into_vec(), vec![1.0, 2.0, 3.0, 0.5, 0.5, 0.5, 0.25, 0.75]);
    }

    #[test]
    fn vertices_are_chunked_by_stride() {
        let mut buf = VertexBuffer::new(VertexLayout::PositionColorUvNormal);
        buf.push_vertex([0.0; 3], [0.0; 3], [0.0; 2], [0.0, 0.0, 1.0]);
        buf.push_vertex([1.0; 3], [0.0; 3], [1.0; 2], [0.0, 1.0, 0.0]);
        let normals: Vec<&[f32]> = buf.vertices().map(|v| &v[8..]).collect();
        assert_eq!(normals, vec![&[0.0, 0.0, 1.0][..], &[0.0, 1.0, 0.0][..]]);
    }
}
