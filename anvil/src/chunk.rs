//! Extraction of the legacy (pre-1.13) chunk schema from a decoded NBT tree,
//! and surface-block selection over it.

use nbt::{NamedTag, TagValue};

use crate::error::{ChunkError, ChunkResult};

/// One vertical 16x16x16 slice of a chunk.
pub struct Section {
    pub y: i8,
    /// Block ids indexed `x + z*16 + y_local*256`.
    pub blocks: Vec<i8>,
}

/// The fields this renderer needs out of a chunk, extracted from its root
/// `Level` compound.
pub struct ChunkData {
    pub x_pos: i32,
    pub z_pos: i32,
    pub height_map: [i32; 256],
    pub sections: Vec<Section>,
}

impl ChunkData {
    /// Extracts chunk data from a chunk's decoded root tags. Fails with
    /// [`ChunkError::InvalidChunk`] naming the first field that's missing
    /// or has the wrong tag kind.
    pub fn extract(roots: &[NamedTag]) -> ChunkResult<Self> {
        let root = nbt::nav::find_root(roots, "")
            .or_else(|| roots.first().map(|t| &t.value))
            .ok_or(ChunkError::InvalidChunk("root"))?;

        let level = root
            .child_by_name("Level")
            .ok_or(ChunkError::InvalidChunk("Level"))?;

        let x_pos = level
            .child_by_name("xPos")
            .and_then(TagValue::as_int)
            .ok_or(ChunkError::InvalidChunk("Level.xPos"))?;
        let z_pos = level
            .child_by_name("zPos")
            .and_then(TagValue::as_int)
            .ok_or(ChunkError::InvalidChunk("Level.zPos"))?;

        let height_map_tag = level
            .child_by_name("HeightMap")
            .and_then(TagValue::as_int_array)
            .ok_or(ChunkError::InvalidChunk("Level.HeightMap"))?;
        if height_map_tag.len() != 256 {
            return Err(ChunkError::InvalidChunk("Level.HeightMap"));
        }
        let mut height_map = [0i32; 256];
        height_map.copy_from_slice(height_map_tag);

        let sections_tag = level
            .child_by_name("Sections")
            .and_then(TagValue::as_list)
            .ok_or(ChunkError::InvalidChunk("Level.Sections"))?;

        let mut sections = Vec::with_capacity(sections_tag.len());
        for section in sections_tag {
            let y = section
                .child_by_name("Y")
                .and_then(TagValue::as_byte)
                .ok_or(ChunkError::InvalidChunk("Level.Sections[].Y"))?;
            let blocks = section
                .child_by_name("Blocks")
                .and_then(TagValue::as_byte_array)
                .ok_or(ChunkError::InvalidChunk("Level.Sections[].Blocks"))?;
            if blocks.len() != 4096 {
                return Err(ChunkError::InvalidChunk("Level.Sections[].Blocks"));
            }
            sections.push(Section {
                y,
                blocks: blocks.to_vec(),
            });
        }

        Ok(Self {
            x_pos,
            z_pos,
            height_map,
            sections,
        })
    }

    /// The block id of the surface block at chunk-local (x, z), i.e. the
    /// block directly below the recorded heightmap air column. Missing
    /// sections (no `Y` slice covering the computed height) are air.
    pub fn surface_block_id(&self, x: usize, z: usize) -> i32 {
        let h = self.height_map[x + z * 16];
        let y = (h - 1).max(0);
        let section_index = y / 16;
        let local_y = y % 16;

        let section = self
            .sections
            .iter()
            .find(|s| s.y as i32 == section_index);

        match section {
            // Block ids are stored as unsigned bytes; sign-extending the `i8`
            // would turn every id above 127 negative.
            Some(s) => s.blocks[x + z * 16 + local_y as usize * 256] as u8 as i32,
            None => AIR_BLOCK_ID,
        }
    }
}

/// Block id 0 is air in the legacy numeric palette; the color table resolves
/// it (and any other unknown id) to opaque black.
pub const AIR_BLOCK_ID: i32 = 0;
