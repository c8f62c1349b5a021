//! Region tile rendering: paints a 512x512 region image from chunk data and
//! synthesizes its zoom pyramid.

use std::path::{Path, PathBuf};

use bitflags::bitflags;
use image::{ImageResult, RgbImage};
use log::warn;

use crate::chunk::ChunkData;
use crate::color::ColorTable;

/// Side length, in pixels, of a region image and of every rendered tile.
pub const TILE_SIDE: u32 = 512;

/// Chunks per side of a region; mirrors [`crate::region::REGION_CHUNKS`].
pub const REGION_CHUNKS: u32 = 32;

/// Background painted into a region image before any chunk is drawn.
pub const BACKGROUND: [u8; 3] = [200, 200, 200];

/// Number of zoom levels beyond the base tile, and their pixel-to-block
/// ratios: level `i` has ratio `2^i`.
pub const ZOOM_LEVELS: u32 = 3;

bitflags! {
    /// Declares which parts of [`ChunkData`] a renderer variant actually
    /// needs, so the interpreter can skip decoding fields that won't be
    /// used.
    pub struct ChunkDataFlags: u8 {
        const HEIGHT_MAP = 0b0000_0001;
        const BLOCK_IDS  = 0b0000_0010;
    }
}

/// Folds a chunk coordinate into its region-relative 0..31 column/row,
/// matching the source's sign convention but clamping the degenerate
/// exact-multiple-of-32 case to the last column instead of producing an
/// out-of-bounds index.
pub fn fold_chunk_coord(pos: i32) -> u32 {
    let m = pos.unsigned_abs() % 32;
    let folded = if pos < 0 { 32 - m } else { m };
    folded.min(31)
}

/// A renderer variant's capability surface: what it needs from chunk data,
/// and the three lifecycle calls a driver makes per region.
pub trait RegionRenderer {
    fn data_flags(&self) -> ChunkDataFlags;
    fn begin_region(&mut self, map_name: &str, region_name: &str, out_dir: &Path);
    fn render_chunk(&mut self, chunk: &ChunkData);
    fn finish_region(&mut self) -> ImageResult<()>;
}

/// The "Classic" renderer: colors every column by its surface block, using
/// the heightmap to find it.
pub struct ClassicRenderer<'c, C: ColorTable + ?Sized> {
    colors: &'c C,
    image: RgbImage,
    out_dir: PathBuf,
    region_name: String,
}

impl<'c, C: ColorTable + ?Sized> ClassicRenderer<'c, C> {
    pub fn new(colors: &'c C) -> Self {
        Self {
            colors,
            image: RgbImage::from_pixel(TILE_SIDE, TILE_SIDE, image::Rgb(BACKGROUND)),
            out_dir: PathBuf::new(),
            region_name: String::new(),
        }
    }
}

impl<'c, C: ColorTable + ?Sized> RegionRenderer for ClassicRenderer<'c, C> {
    fn data_flags(&self) -> ChunkDataFlags {
        ChunkDataFlags::HEIGHT_MAP | ChunkDataFlags::BLOCK_IDS
    }

    fn begin_region(&mut self, _map_name: &str, region_name: &str, out_dir: &Path) {
        self.image = RgbImage::from_pixel(TILE_SIDE, TILE_SIDE, image::Rgb(BACKGROUND));
        self.out_dir = out_dir.to_path_buf();
        self.region_name = region_name.to_string();
    }

    fn render_chunk(&mut self, chunk: &ChunkData) {
        let cx = fold_chunk_coord(chunk.x_pos);
        let cz = fold_chunk_coord(chunk.z_pos);
        let origin_x = cx * 16;
        let origin_z = cz * 16;

        for z in 0..16usize {
            for x in 0..16usize {
                let id = chunk.surface_block_id(x, z);
                let color = self.colors.color_of(id);
                self.image
                    .put_pixel(origin_x + x as u32, origin_z + z as u32, image::Rgb(color));
            }
        }
    }

    fn finish_region(&mut self) -> ImageResult<()> {
        write_level_zero(&self.image, &self.out_dir, &self.region_name)?;
        write_zoom_pyramid(&self.image, &self.out_dir, &self.region_name)
    }
}

fn level_dir(out_dir: &Path, level: u32) -> PathBuf {
    out_dir.join(level.to_string())
}

fn tile_path(out_dir: &Path, level: u32, region_name: &str, index: u32) -> PathBuf {
    level_dir(out_dir, level).join(format!("{region_name}-{index}.jpeg"))
}

fn write_level_zero(image: &RgbImage, out_dir: &Path, region_name: &str) -> ImageResult<()> {
    let dir = level_dir(out_dir, 0);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("could not create tile directory {}: {e}", dir.display());
        return Err(e.into());
    }
    image.save(tile_path(out_dir, 0, region_name, 0))
}

/// Builds zoom levels 1..=[`ZOOM_LEVELS`]. Each level divides the source
/// image into `4^level` sub-tiles along a `2^level` grid; every sub-tile is
/// upscaled to the full `TILE_SIDE` by blowing each source pixel up into a
/// solid `ratio x ratio` square, where `ratio = 2^level` is both the grid
/// size and the pixel-to-block ratio for that level.
fn write_zoom_pyramid(image: &RgbImage, out_dir: &Path, region_name: &str) -> ImageResult<()> {
    for level in 1..=ZOOM_LEVELS {
        let grid = 1u32 << level;
        let side_length = TILE_SIDE / grid;
        let ratio = grid;

        let dir = level_dir(out_dir, level);
        std::fs::create_dir_all(&dir)?;

        for tile_z in 0..grid {
            for tile_x in 0..grid {
                let index = tile_z * grid + tile_x;
                let mut tile = RgbImage::new(TILE_SIDE, TILE_SIDE);

                for sy in 0..side_length {
                    for sx in 0..side_length {
                        let src_x = tile_x * side_length + sx;
                        let src_z = tile_z * side_length + sy;
                        let pixel = *image.get_pixel(src_x, src_z);

                        for dy in 0..ratio {
                            for dx in 0..ratio {
                                tile.put_pixel(sx * ratio + dx, sy * ratio + dy, pixel);
                            }
                        }
                    }
                }

                tile.save(tile_path(out_dir, level, region_name, index))?;
            }
        }
    }

    Ok(())
}
