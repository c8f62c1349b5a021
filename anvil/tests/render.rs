use nbt::{NamedTag, TagId, TagValue};

use anvil::chunk::ChunkData;
use anvil::color::StaticColorTable;
use anvil::render::{fold_chunk_coord, ClassicRenderer, RegionRenderer};

fn int_compound(fields: Vec<(&str, TagValue)>) -> TagValue {
    TagValue::Compound(
        fields
            .into_iter()
            .map(|(name, value)| NamedTag {
                name: name.to_string(),
                value,
            })
            .collect(),
    )
}

fn single_chunk_root(x_pos: i32, z_pos: i32) -> Vec<NamedTag> {
    let level = int_compound(vec![
        ("xPos", TagValue::Int(x_pos)),
        ("zPos", TagValue::Int(z_pos)),
        ("HeightMap", TagValue::IntArray(vec![0; 256])),
        ("Sections", TagValue::List(TagId::Compound, vec![])),
    ]);
    vec![NamedTag {
        name: String::new(),
        value: int_compound(vec![("Level", level)]),
    }]
}

#[test]
fn fold_chunk_coord_is_identity_in_range() {
    assert_eq!(fold_chunk_coord(0), 0);
    assert_eq!(fold_chunk_coord(31), 31);
    assert_eq!(fold_chunk_coord(15), 15);
}

#[test]
fn fold_chunk_coord_mirrors_negative_values() {
    // -1 should land on column 31 (one before the boundary), matching the
    // source's "abs mod 32, then invert" convention for non-exact values.
    assert_eq!(fold_chunk_coord(-1), 31);
    assert_eq!(fold_chunk_coord(-31), 1);
}

#[test]
fn fold_chunk_coord_clamps_exact_multiple_of_32() {
    // The flagged boundary case: abs(-32) % 32 == 0, and 32 - 0 == 32 would
    // be out of bounds, so it's clamped to the last valid column instead.
    assert_eq!(fold_chunk_coord(-32), 31);
    assert_eq!(fold_chunk_coord(32), 0);
}

#[test]
fn zoom_pyramid_has_expected_tile_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let roots = single_chunk_root(0, 0);
    let chunk = ChunkData::extract(&roots).expect("extract");

    let colors = StaticColorTable::new();
    let mut renderer = ClassicRenderer::new(&colors);
    renderer.begin_region("world", "r.0.0", dir.path());
    renderer.render_chunk(&chunk);
    renderer.finish_region().expect("finish_region");

    let count_in = |level: u32| {
        std::fs::read_dir(dir.path().join(level.to_string()))
            .map(|entries| entries.count())
            .unwrap_or(0)
    };

    assert_eq!(count_in(0), 1);
    assert_eq!(count_in(1), 4);
    assert_eq!(count_in(2), 16);
    assert_eq!(count_in(3), 64);
}
