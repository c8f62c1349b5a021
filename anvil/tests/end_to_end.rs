//! Drives the whole pipeline from a world directory on disk, the way
//! `render_world` is meant to be used by a caller: discover the world,
//! open each region file, decode each chunk, paint it, write tiles.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use anvil::{render_world, ClassicRenderer, StaticColorTable, World};

const HEADER_SIZE: u64 = 8192;
const SECTOR_SIZE: u64 = 4096;

fn minimal_chunk_nbt(x_pos: i32, z_pos: i32) -> Vec<u8> {
    // TAG_Compound("") { TAG_Compound("Level") {
    //   xPos: Int, zPos: Int, HeightMap: IntArray[256] (all 1),
    //   Sections: List<Compound> [] } }
    let mut buf = Vec::new();
    buf.extend_from_slice(&[0x0A, 0x00, 0x00]); // root compound, unnamed
    buf.extend_from_slice(&[0x0A, 0x00, 0x05]);
    buf.extend_from_slice(b"Level");

    buf.extend_from_slice(&[0x03, 0x00, 0x04]);
    buf.extend_from_slice(b"xPos");
    buf.extend_from_slice(&x_pos.to_be_bytes());

    buf.extend_from_slice(&[0x03, 0x00, 0x04]);
    buf.extend_from_slice(b"zPos");
    buf.extend_from_slice(&z_pos.to_be_bytes());

    buf.extend_from_slice(&[0x0B, 0x00, 0x09]);
    buf.extend_from_slice(b"HeightMap");
    buf.extend_from_slice(&256i32.to_be_bytes());
    for _ in 0..256 {
        buf.extend_from_slice(&1i32.to_be_bytes());
    }

    buf.extend_from_slice(&[0x09, 0x00, 0x08]);
    buf.extend_from_slice(b"Sections");
    buf.push(0x0A); // element kind Compound
    buf.extend_from_slice(&0i32.to_be_bytes()); // empty list

    buf.push(0x00); // end Level
    buf.push(0x00); // end root
    buf
}

fn write_region_file(path: &std::path::Path, raw_chunk: &[u8]) {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw_chunk).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut buf = vec![0u8; HEADER_SIZE as usize];
    buf[0] = 0x00;
    buf[1] = 0x00;
    buf[2] = 0x02; // sector offset 2
    buf[3] = 0x01; // sector count 1

    let payload_len = (compressed.len() + 1) as i32;
    buf.extend_from_slice(&payload_len.to_be_bytes());
    buf.push(2); // zlib
    buf.extend_from_slice(&compressed);

    let sectors = (buf.len() as u64 + SECTOR_SIZE - 1) / SECTOR_SIZE;
    buf.resize((sectors * SECTOR_SIZE) as usize, 0);

    std::fs::write(path, buf).expect("write region file");
}

fn build_world(dir: &std::path::Path) {
    std::fs::write(dir.join("level.dat"), b"not valid gzip, decode failure is non-fatal")
        .expect("write level.dat");
    let region_dir = dir.join("region");
    std::fs::create_dir(&region_dir).expect("create region dir");
    write_region_file(&region_dir.join("r.0.0.mca"), &minimal_chunk_nbt(0, 0));
}

#[test]
fn render_world_produces_full_zoom_pyramid_for_one_chunk() {
    let world_dir = tempfile::tempdir().expect("tempdir");
    build_world(world_dir.path());

    let out_dir = tempfile::tempdir().expect("tempdir");

    let world = World::open(world_dir.path()).expect("open world");
    let colors = StaticColorTable::new();
    let mut renderer = ClassicRenderer::new(&colors);

    render_world(&world, &mut renderer, out_dir.path()).expect("render world");

    let count_in = |level: u32| {
        std::fs::read_dir(out_dir.path().join(level.to_string()))
            .map(|entries| entries.count())
            .unwrap_or(0)
    };

    assert_eq!(count_in(0), 1);
    assert_eq!(count_in(1), 4);
    assert_eq!(count_in(2), 16);
    assert_eq!(count_in(3), 64);
}

#[test]
fn render_world_parallel_matches_sequential_output_counts() {
    let world_dir = tempfile::tempdir().expect("tempdir");
    build_world(world_dir.path());

    let out_dir = tempfile::tempdir().expect("tempdir");

    let world = World::open(world_dir.path()).expect("open world");
    let colors = StaticColorTable::new();

    anvil::render_world_parallel(&world, out_dir.path(), || ClassicRenderer::new(&colors))
        .expect("render world parallel");

    let count_in = |level: u32| {
        std::fs::read_dir(out_dir.path().join(level.to_string()))
            .map(|entries| entries.count())
            .unwrap_or(0)
    };

    assert_eq!(count_in(0), 1);
    assert_eq!(count_in(3), 64);
}
