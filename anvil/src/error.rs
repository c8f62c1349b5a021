//! Error and result types for region reading and rendering.

use std::fmt;

/// Errors that can abort processing of an entire region file.
#[derive(Debug)]
pub enum RegionError {
    /// The file is shorter than the 8 KiB header.
    HeaderTooShort { len: u64 },
    /// A chunk location's sector offset pointed before the header.
    InvalidOffset { offset: u32, count: u8 },
    Io(std::io::Error),
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::HeaderTooShort { len } => {
                write!(f, "region file is only {len} bytes, header needs 8192")
            }
            RegionError::InvalidOffset { offset, count } => write!(
                f,
                "chunk location has offset {offset} sectors (count {count}), which overlaps the header"
            ),
            RegionError::Io(e) => write!(f, "io error reading region file: {e}"),
        }
    }
}

impl std::error::Error for RegionError {}

impl From<std::io::Error> for RegionError {
    fn from(e: std::io::Error) -> Self {
        RegionError::Io(e)
    }
}

pub type RegionResult<T> = std::result::Result<T, RegionError>;

/// Errors that cause a single chunk to be skipped without aborting the
/// containing region.
#[derive(Debug)]
pub enum ChunkError {
    /// The region declared a compression code this reader does not decode
    /// (anything but zlib).
    UnsupportedCompression(u8),
    /// A chunk's declared payload length was too small to carry even the
    /// compression code byte.
    EmptyPayload,
    /// Decompression or NBT decoding failed.
    Nbt(nbt::Error),
    /// A required field was missing, or had the wrong tag kind.
    InvalidChunk(&'static str),
    Io(std::io::Error),
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::UnsupportedCompression(c) => {
                write!(f, "unsupported chunk compression code {c}")
            }
            ChunkError::EmptyPayload => write!(f, "chunk payload too short to contain data"),
            ChunkError::Nbt(e) => write!(f, "nbt error while decoding chunk: {e}"),
            ChunkError::InvalidChunk(field) => write!(f, "chunk missing or malformed field: {field}"),
            ChunkError::Io(e) => write!(f, "io error reading chunk: {e}"),
        }
    }
}

impl std::error::Error for ChunkError {}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}

impl From<nbt::Error> for ChunkError {
    fn from(e: nbt::Error) -> Self {
        ChunkError::Nbt(e)
    }
}

pub type ChunkResult<T> = std::result::Result<T, ChunkError>;

/// Fatal errors at the level of an entire world.
#[derive(Debug)]
pub enum WorldError {
    NotADirectory(std::path::PathBuf),
    MissingRegionDir(std::path::PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::NotADirectory(p) => write!(f, "{} is not a directory", p.display()),
            WorldError::MissingRegionDir(p) => {
                write!(f, "world is missing its region directory at {}", p.display())
            }
            WorldError::Io(e) => write!(f, "io error opening world: {e}"),
        }
    }
}

impl std::error::Error for WorldError {}

impl From<std::io::Error> for WorldError {
    fn from(e: std::io::Error) -> Self {
        WorldError::Io(e)
    }
}

pub type WorldResult<T> = std::result::Result<T, WorldError>;
