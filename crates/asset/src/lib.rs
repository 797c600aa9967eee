//! Asset loading for the demos: OBJ meshes into interleaved vertex buffers,
//! MTL materials, diffuse textures and a few hand-built primitives.
//!
//! All loaders are pure functions of their input; parser state lives only for
//! the duration of one call.

pub mod error;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod primitives;
pub mod texture;

pub use error::{AssetError, AssetResult, Attribute, ErrorKind};
pub use mesh::{VertexBuffer, VertexLayout};
pub use mtl::{Material, load_mtl_from_path};
pub use obj::{ObjMesh, load_obj_from_path};
pub use texture::{PixelFormat, TextureData};
