//! World directory discovery: validates a save directory and enumerates its
//! region files, mirroring the load step a driver performs before rendering.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::warn;

use crate::error::{WorldError, WorldResult};

/// A located, validated world directory: `level.dat` exists and `region/`
/// is a directory. `level.dat`'s fields are decoded but not otherwise used
/// by this crate.
pub struct World {
    pub name: String,
    pub path: PathBuf,
    pub region_dir: PathBuf,
}

impl World {
    /// Opens `path` as a world directory: checks it is a directory,
    /// requires `level.dat` to be present and to decode as gzip-compressed
    /// NBT, and requires a `region/` subdirectory to exist.
    pub fn open(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(WorldError::NotADirectory(path));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let level_dat_path = path.join("level.dat");
        if let Err(e) = decode_level_dat(&level_dat_path) {
            warn!("level.dat at {} could not be decoded: {e}", level_dat_path.display());
        }

        let region_dir = path.join("region");
        if !region_dir.is_dir() {
            return Err(WorldError::MissingRegionDir(region_dir));
        }

        Ok(Self {
            name,
            path,
            region_dir,
        })
    }

    /// Lists every file in `region/` whose extension is `.mca`,
    /// case-insensitively, in directory iteration order.
    pub fn region_files(&self) -> WorldResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.region_dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_mca = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("mca"))
                .unwrap_or(false);
            if is_mca {
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn decode_level_dat(path: &Path) -> nbt::Result<Vec<nbt::NamedTag>> {
    let file = fs::File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    nbt::decode(bytes.as_slice())
}

/// Parses a region filename of the form `r.<rx>.<rz>.mca` into its region
/// coordinates. Returns `None` for names that don't match.
pub fn parse_region_filename(path: &Path) -> Option<(i32, i32)> {
    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.split('.');
    if parts.next()? != "r" {
        return None;
    }
    let rx = parts.next()?.parse().ok()?;
    let rz = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((rx, rz))
}
