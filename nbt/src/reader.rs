//! Big-endian primitive decoding over an already-decompressed byte source.
//!
//! The decoder is the only consumer of this module; it never does its own
//! (de)compression, matching §4.1 — gzip/zlib inflation happens one layer
//! up, in whatever supplies the `Read` passed to [`decode`](crate::decode::decode).

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::Result;

/// Wraps a reader and decodes NBT's big-endian primitives from it.
///
/// Keeps a running count of bytes consumed. The count has no effect on
/// decoding; it exists purely so a caller can bound how much of a stream
/// was read.
pub struct ByteReader<R> {
    inner: R,
    bytes_read: u64,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Number of bytes successfully read so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Reads exactly `n` bytes, failing with `UnexpectedEof` otherwise.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf)?;
        self.bytes_read += n as u64;
        Ok(buf)
    }

    /// Reads a single unsigned byte, e.g. a tag id or compression code.
    pub fn read_u8(&mut self) -> Result<u8> {
        let v = self.inner.read_u8()?;
        self.bytes_read += 1;
        Ok(v)
    }

    /// Attempts to read one byte, distinguishing a clean end of stream
    /// (returns `Ok(None)`) from an error partway through a read. Used only
    /// at the point where the decoder looks for the next root tag.
    pub fn read_tag_id_or_eof(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        let n = self.inner.read(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.bytes_read += 1;
        Ok(Some(buf[0]))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let v = self.inner.read_i8()?;
        self.bytes_read += 1;
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let v = self.inner.read_i16::<BigEndian>()?;
        self.bytes_read += 2;
        Ok(v)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let v = self.inner.read_i32::<BigEndian>()?;
        self.bytes_read += 4;
        Ok(v)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let v = self.inner.read_i64::<BigEndian>()?;
        self.bytes_read += 8;
        Ok(v)
    }

    /// IEEE 754 single precision. Unlike the original MCMapper3 decoder,
    /// which read four bytes as an integer and cast it to `float`, this
    /// reinterprets the bit pattern, as the NBT format requires.
    pub fn read_f32(&mut self) -> Result<f32> {
        let v = self.inner.read_f32::<BigEndian>()?;
        self.bytes_read += 4;
        Ok(v)
    }

    /// IEEE 754 double precision; see [`read_f32`](Self::read_f32).
    pub fn read_f64(&mut self) -> Result<f64> {
        let v = self.inner.read_f64::<BigEndian>()?;
        self.bytes_read += 8;
        Ok(v)
    }

    /// Reads a length-prefixed (i16) UTF-8 string, the format shared by
    /// tag names and `String` payloads.
    pub fn read_sized_string(&mut self) -> Result<String> {
        use crate::error::Error;

        let len = self.read_i16()?;
        if len < 0 {
            return Err(Error::MalformedLength(len as i32));
        }
        let bytes = self.read_bytes(len as usize)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }
}
