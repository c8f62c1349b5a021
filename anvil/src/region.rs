//! Reader for Anvil `.mca` region files: locates, decompresses, and yields
//! each chunk's raw (still NBT-encoded) payload.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;
use log::warn;

use crate::error::{ChunkError, ChunkResult, RegionError, RegionResult};

/// Size in bytes of one region-file sector, the unit chunk offsets are
/// expressed in.
pub const SECTOR_SIZE: u64 = 4096;

/// Size of the two-part header: 1024 chunk locations, then 1024 timestamps.
pub const HEADER_SIZE: u64 = 2 * SECTOR_SIZE;

/// Chunks per side of a region.
pub const REGION_CHUNKS: u32 = 32;

/// One entry from the region header's location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// Sector offset from the start of the file. Zero means absent.
    pub sector_offset: u32,
    pub sector_count: u8,
}

impl ChunkLocation {
    fn is_present(&self) -> bool {
        self.sector_count != 0
    }
}

/// A parsed region-file header: 1024 chunk locations in row-major
/// (x + z*32) order, plus their associated timestamps.
pub struct RegionHeader {
    pub locations: Vec<ChunkLocation>,
    pub timestamps: Vec<u32>,
}

impl RegionHeader {
    fn parse(bytes: &[u8; HEADER_SIZE as usize]) -> Self {
        let mut locations = Vec::with_capacity(1024);
        for i in 0..1024 {
            let entry = &bytes[i * 4..i * 4 + 4];
            let offset = u32::from(entry[0]) << 16 | u32::from(entry[1]) << 8 | u32::from(entry[2]);
            let count = entry[3];
            locations.push(ChunkLocation {
                sector_offset: offset,
                sector_count: count,
            });
        }

        let mut timestamps = Vec::with_capacity(1024);
        for i in 0..1024 {
            let base = 4096 + i * 4;
            let entry = &bytes[base..base + 4];
            timestamps.push(u32::from_be_bytes([entry[0], entry[1], entry[2], entry[3]]));
        }

        Self {
            locations,
            timestamps,
        }
    }
}

/// A region file opened for reading. Chunk payloads are decompressed lazily,
/// one at a time, as [`Region::chunks`] is iterated.
pub struct Region<S> {
    source: S,
    header: RegionHeader,
}

impl<S: Read + Seek> Region<S> {
    /// Opens a region from any seekable byte source, reading and validating
    /// the header immediately. Any present slot whose sector offset would
    /// overlap the header (§3's "offsets are either 0 or >= 2" invariant)
    /// fails the whole region, per §7's `MalformedRegion` classification.
    pub fn open(mut source: S) -> RegionResult<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        if len < HEADER_SIZE {
            return Err(RegionError::HeaderTooShort { len });
        }
        source.seek(SeekFrom::Start(0))?;

        let mut buf = [0u8; HEADER_SIZE as usize];
        source.read_exact(&mut buf)?;
        let header = RegionHeader::parse(&buf);

        for loc in &header.locations {
            if loc.is_present() && loc.sector_offset < 2 {
                return Err(RegionError::InvalidOffset {
                    offset: loc.sector_offset,
                    count: loc.sector_count,
                });
            }
        }

        Ok(Self { source, header })
    }

    /// Iterates present chunk slots in row-major (x + z*32) order, the same
    /// order they appear in the header, decompressing each as it's reached.
    /// A chunk that fails to read or decompress is logged and skipped; the
    /// region itself is only ever aborted by [`open`](Self::open) failing.
    pub fn chunks(&mut self) -> impl Iterator<Item = (u32, u32, Vec<u8>)> + '_ {
        let slots: Vec<(u32, u32, ChunkLocation)> = (0..REGION_CHUNKS)
            .flat_map(|z| (0..REGION_CHUNKS).map(move |x| (x, z)))
            .map(|(x, z)| {
                let idx = (x + z * REGION_CHUNKS) as usize;
                (x, z, self.header.locations[idx])
            })
            .filter(|(_, _, loc)| loc.is_present())
            .collect();

        slots.into_iter().filter_map(move |(x, z, loc)| {
            match read_chunk_payload(&mut self.source, loc) {
                Ok(bytes) => Some((x, z, bytes)),
                Err(e) => {
                    warn!("skipping chunk ({x}, {z}): {e}");
                    None
                }
            }
        })
    }

    pub fn timestamp(&self, x: u32, z: u32) -> u32 {
        self.header.timestamps[(x + z * REGION_CHUNKS) as usize]
    }
}

/// Reads and decompresses one chunk's payload. Sector offsets are validated
/// once up front in [`Region::open`]; every failure here (truncated length,
/// unsupported compression, bad zlib data) is a per-chunk `ChunkError` that
/// [`Region::chunks`] logs with `warn!` and skips, per §7.
fn read_chunk_payload<S: Read + Seek>(source: &mut S, loc: ChunkLocation) -> ChunkResult<Vec<u8>> {
    source.seek(SeekFrom::Start(loc.sector_offset as u64 * SECTOR_SIZE))?;

    let length = source.read_i32::<BigEndian>()?;
    if length <= 1 {
        return Err(ChunkError::EmptyPayload);
    }
    let compression = source.read_u8()?;
    if compression != 2 {
        return Err(ChunkError::UnsupportedCompression(compression));
    }

    let mut compressed = vec![0u8; (length - 1) as usize];
    source.read_exact(&mut compressed)?;

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;

    Ok(decompressed)
}
