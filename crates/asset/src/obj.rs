//! OBJ parser producing flat interleaved vertex buffers.
//!
//! Parsing happens in two phases. The scan fills the attribute pools and
//! collects faces; only once the whole file is read are faces resolved
//! against the pools, so a face may reference attributes defined after it.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{AssetError, AssetResult, Attribute, parse_field},
    mesh::{VertexBuffer, VertexLayout},
};

/// Color written for every OBJ vertex; OBJ files carry no vertex color here.
pub const PLACEHOLDER_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
/// Used when a face vertex has no texture coordinate index.
pub const DEFAULT_UV: [f32; 2] = [0.0, 0.0];
/// Used when a face vertex has no normal index.
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// One `position/uv/normal` reference, converted to 0-based indices.
///
/// Indices are signed: a `0` in the file becomes `-1` and is only rejected if
/// the component is actually looked up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FaceVertexRef {
    pub position: i64,
    pub uv: Option<i64>,
    pub normal: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub vertices: Vec<FaceVertexRef>,
    /// 1-based line the face was read from.
    pub line: usize,
}

/// Attribute pools and faces of one OBJ file, before resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub faces: Vec<Face>,
}

impl ObjMesh {
    /// Total number of face-vertex references, i.e. vertices emitted by
    /// [`ObjMesh::interleave`].
    pub fn face_vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.vertices.len()).sum()
    }

    /// Resolve all faces, in order, into a buffer with the given layout.
    pub fn interleave(&self, layout: VertexLayout) -> AssetResult<VertexBuffer> {
        let mut buffer = VertexBuffer::with_capacity(layout, self.face_vertex_count());

        for face in &self.faces {
            for fv in &face.vertices {
                let position = lookup(&self.positions, fv.position, Attribute::Position, face.line)?;
                let uv = match fv.uv {
                    Some(i) if layout.has_uv() => {
                        lookup(&self.texcoords, i, Attribute::TexCoord, face.line)?
                    }
                    _ => DEFAULT_UV,
                };
                let normal = match fv.normal {
                    Some(i) if layout.has_normal() => {
                        lookup(&self.normals, i, Attribute::Normal, face.line)?
                    }
                    _ => DEFAULT_NORMAL,
                };
                buffer.push_vertex(position, PLACEHOLDER_COLOR, uv, normal);
            }
        }

        Ok(buffer)
    }
}

/// Load an OBJ file and interleave it with `layout`.
pub fn load_obj_from_path(path: impl AsRef<Path>, layout: VertexLayout) -> AssetResult<VertexBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading OBJ mesh from {:?}", path);
    let buffer = load_obj_from_reader(BufReader::new(file), layout)?;
    log::info!(
        "Loaded {} vertices (stride {}) from {:?}",
        buffer.vertex_count(),
        buffer.stride(),
        path
    );
    Ok(buffer)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R, layout: VertexLayout) -> AssetResult<VertexBuffer> {
    parse_obj_from_reader(reader)?.interleave(layout)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str, layout: VertexLayout) -> AssetResult<VertexBuffer> {
    load_obj_from_reader(io::Cursor::new(contents), layout)
}

/// Run only the scan phase, returning the unresolved pools and faces.
pub fn parse_obj_from_reader<R: BufRead>(reader: R) -> AssetResult<ObjMesh> {
    let mut mesh = ObjMesh::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| AssetError::Read {
            line: line_no,
            source,
        })?;
        log::trace!("obj {line_no}: {line}");

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => {
                let x = parse_field(parts.next(), line_no, "x coordinate")?;
                let y = parse_field(parts.next(), line_no, "y coordinate")?;
                let z = parse_field(parts.next(), line_no, "z coordinate")?;
                mesh.positions.push([x, y, z]);
            }
            "vt" => {
                let u = parse_field(parts.next(), line_no, "u coordinate")?;
                let v = parse_field(parts.next(), line_no, "v coordinate")?;
                mesh.texcoords.push([u, v]);
            }
            "vn" => {
                let nx = parse_field(parts.next(), line_no, "nx coordinate")?;
                let ny = parse_field(parts.next(), line_no, "ny coordinate")?;
                let nz = parse_field(parts.next(), line_no, "nz coordinate")?;
                mesh.normals.push([nx, ny, nz]);
            }
            "f" => {
                let vertices = parts
                    .map(|part| parse_face_vertex(part, line_no))
                    .collect::<AssetResult<Vec<_>>>()?;
                if vertices.len() < 3 {
                    log::warn!(
                        "Face on line {} has {} vertices, forwarding as-is",
                        line_no,
                        vertices.len()
                    );
                }
                mesh.faces.push(Face {
                    vertices,
                    line: line_no,
                });
            }
            _ => {
                // o/g/s/usemtl/mtllib and friends carry nothing we emit.
            }
        }
    }

    log::debug!(
        "OBJ scan: {} positions, {} texcoords, {} normals, {} faces",
        mesh.positions.len(),
        mesh.texcoords.len(),
        mesh.normals.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

pub fn parse_obj_from_str(contents: &str) -> AssetResult<ObjMesh> {
    parse_obj_from_reader(io::Cursor::new(contents))
}

/// Parse a face element such as `5/3/2`, `5//2`, `5/3` or `5`.
///
/// The position index is required; empty or missing uv/normal sub-tokens are
/// absent components.
pub fn parse_face_vertex(token: &str, line: usize) -> AssetResult<FaceVertexRef> {
    let mut split = token.split('/');

    let position = match split.next() {
        Some(value) if !value.is_empty() => parse_index(value, line)?,
        _ => {
            return Err(AssetError::Parse {
                line,
                what: "face element",
                token: token.to_owned(),
            });
        }
    };
    let uv = parse_optional_index(split.next(), line)?;
    let normal = parse_optional_index(split.next(), line)?;

    if split.next().is_some() {
        return Err(AssetError::Parse {
            line,
            what: "face element",
            token: token.to_owned(),
        });
    }

    Ok(FaceVertexRef {
        position,
        uv,
        normal,
    })
}

fn parse_optional_index(value: Option<&str>, line: usize) -> AssetResult<Option<i64>> {
    match value {
        Some(value) if !value.is_empty() => parse_index(value, line).map(Some),
        _ => Ok(None),
    }
}

fn parse_index(token: &str, line: usize) -> AssetResult<i64> {
    let raw: i64 = parse_field(Some(token), line, "face index")?;
    raw.checked_sub(1).ok_or_else(|| AssetError::Parse {
        line,
        what: "face index",
        token: token.to_owned(),
    })
}

fn lookup<const N: usize>(
    pool: &[[f32; N]],
    index: i64,
    attribute: Attribute,
    line: usize,
) -> AssetResult<[f32; N]> {
    usize::try_from(index)
        .ok()
        .and_then(|i| pool.get(i).copied())
        .ok_or(AssetError::OutOfRange {
            line,
            attribute,
            index,
            len: pool.len(),
        })
}
