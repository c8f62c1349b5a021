//! Decoder for Minecraft's Named Binary Tag format.
//!
//! [`decode::decode`] turns an already-decompressed byte stream into a tree
//! of [`tag::TagValue`], which can then be walked with the lookup helpers in
//! [`nav`]. This crate does no compression handling itself; callers feed it
//! bytes from a `flate2` decoder or a plain file.

pub mod decode;
pub mod error;
pub mod nav;
pub mod reader;
pub mod tag;

pub use decode::decode;
pub use error::{Error, Result};
pub use tag::{NamedTag, TagId, TagValue};
