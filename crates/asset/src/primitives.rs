//! Hand-built geometry in the same interleaved form as loaded meshes.

use crate::mesh::{VertexBuffer, VertexLayout};

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];

/// Axis-aligned box as 12 triangles (36 vertices, `PositionColor`), one flat
/// color per side: front red, back green, left blue, right yellow,
/// top magenta, bottom cyan.
pub fn colored_box(min: [f32; 3], max: [f32; 3]) -> VertexBuffer {
    let mut buffer = VertexBuffer::with_capacity(VertexLayout::PositionColor, 36);
    push_box(&mut buffer, min, max);
    buffer
}

/// The two boxes of the rotating-cubes demo in one buffer.
pub fn two_cube_scene() -> VertexBuffer {
    let mut buffer = VertexBuffer::with_capacity(VertexLayout::PositionColor, 72);
    push_box(&mut buffer, [-1.0, -1.0, -0.25], [-0.5, -0.5, 0.25]);
    push_box(&mut buffer, [0.5, 0.0, -0.5], [1.0, 0.5, 0.0]);
    buffer
}

fn push_box(buffer: &mut VertexBuffer, min: [f32; 3], max: [f32; 3]) {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;

    let sides = [
        ([[x0, y0, z1], [x0, y1, z1], [x1, y0, z1], [x1, y1, z1]], RED),
        ([[x0, y0, z0], [x0, y1, z0], [x1, y0, z0], [x1, y1, z0]], GREEN),
        ([[x0, y0, z1], [x0, y1, z1], [x0, y0, z0], [x0, y1, z0]], BLUE),
        ([[x1, y0, z1], [x1, y1, z1], [x1, y0, z0], [x1, y1, z0]], YELLOW),
        ([[x0, y1, z1], [x1, y1, z1], [x0, y1, z0], [x1, y1, z0]], MAGENTA),
        ([[x0, y0, z1], [x1, y0, z1], [x0, y0, z0], [x1, y0, z0]], CYAN),
    ];

    for ([a, b, c, d], color) in sides {
        for corner in [a, b, c, b, d, c] {
            buffer.push_vertex(corner, color, [0.0; 2], [0.0; 3]);
        }
    }
}
