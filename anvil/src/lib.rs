//! Region-file reader and top-down tile renderer for Minecraft Anvil worlds.
//!
//! Ties together [`nbt`] decoding, the [`region`] reader, [`chunk`]
//! interpretation, and [`render`] into the pipeline a driver runs per
//! world: discover region files with [`world`], decode each chunk, and
//! paint it through a [`render::RegionRenderer`].

pub mod chunk;
pub mod color;
pub mod error;
pub mod region;
pub mod render;
pub mod world;

pub use chunk::ChunkData;
pub use color::{ColorTable, StaticColorTable};
pub use region::Region;
pub use render::{ChunkDataFlags, ClassicRenderer, RegionRenderer};
pub use world::World;

use std::fs::File;
use std::path::{Path, PathBuf};

use log::warn;

use error::ChunkError;

/// Renders every region file in `world` into `out_dir` using `renderer`.
/// A region whose header fails to parse is logged and skipped; everything
/// else (bad chunks, unsupported compression) is handled per-chunk inside
/// [`region::Region`] and [`chunk::ChunkData::extract`].
pub fn render_world<R: RegionRenderer>(
    world: &World,
    renderer: &mut R,
    out_dir: &Path,
) -> error::WorldResult<()> {
    let region_paths = world.region_files()?;

    for path in region_paths {
        render_one_region(&world.name, &path, renderer, out_dir);
    }

    Ok(())
}

/// Same pipeline as [`render_world`], but one region at a time is handed to
/// its own renderer instance, built by `make_renderer`, and regions are
/// processed across a `rayon` thread pool. Sound per §5: distinct regions
/// share no mutable state, so each worker owning its own renderer (and
/// therefore its own 512x512 image) never races with another.
pub fn render_world_parallel<R, F>(
    world: &World,
    out_dir: &Path,
    make_renderer: F,
) -> error::WorldResult<()>
where
    R: RegionRenderer,
    F: Fn() -> R + Sync,
{
    use rayon::prelude::*;

    let region_paths = world.region_files()?;

    region_paths.par_iter().for_each(|path| {
        let mut renderer = make_renderer();
        render_one_region(&world.name, path, &mut renderer, out_dir);
    });

    Ok(())
}

fn render_one_region<R: RegionRenderer>(
    map_name: &str,
    path: &PathBuf,
    renderer: &mut R,
    out_dir: &Path,
) {
    let region_name = match path.file_stem().and_then(|s| s.to_str()) {
        Some(s) => s.to_string(),
        None => return,
    };

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("could not open region file {}: {e}", path.display());
            return;
        }
    };

    let mut region = match Region::open(file) {
        Ok(r) => r,
        Err(e) => {
            warn!("skipping region {}: {e}", path.display());
            return;
        }
    };

    renderer.begin_region(map_name, &region_name, out_dir);

    for (_x, _z, payload) in region.chunks() {
        match decode_chunk(&payload) {
            Ok(chunk) => renderer.render_chunk(&chunk),
            Err(e) => warn!("skipping chunk in region {region_name}: {e}"),
        }
    }

    if let Err(e) = renderer.finish_region() {
        warn!("failed writing tiles for region {region_name}: {e}");
    }
}

fn decode_chunk(payload: &[u8]) -> Result<ChunkData, ChunkError> {
    let roots = nbt::decode(payload)?;
    ChunkData::extract(&roots)
}
