//! Error types shared by the asset loaders.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Vertex attribute pool a face index points into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texture coordinate",
            Attribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Coarse classification of [`AssetError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Io,
    Parse,
    OutOfRange,
    Image,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Invalid {what} '{token}' on line {line}")]
    Parse {
        line: usize,
        what: &'static str,
        token: String,
    },

    #[error("Missing {what} on line {line}")]
    Missing { line: usize, what: &'static str },

    /// `index` is the 0-based value after conversion from the file's 1-based one.
    #[error("Face on line {line} references {attribute} {index} but only {len} are defined")]
    OutOfRange {
        line: usize,
        attribute: Attribute,
        index: i64,
        len: usize,
    },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture data is {actual} bytes, expected {expected} for {width}x{height}")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl AssetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssetError::Io { .. } | AssetError::Read { .. } => ErrorKind::Io,
            AssetError::Parse { .. } | AssetError::Missing { .. } => ErrorKind::Parse,
            AssetError::OutOfRange { .. } => ErrorKind::OutOfRange,
            AssetError::Image { .. } | AssetError::TextureSize { .. } => ErrorKind::Image,
        }
    }
}

pub type AssetResult<T> = Result<T, AssetError>;

/// Parse one whitespace-separated field, reporting the 1-based `line`.
pub(crate) fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    line: usize,
    what: &'static str,
) -> AssetResult<T> {
    let token = value.ok_or(AssetError::Missing { line, what })?;
    token.parse::<T>().map_err(|_| AssetError::Parse {
        line,
        what,
        token: token.to_owned(),
    })
}
