use nbt::{NamedTag, TagId, TagValue};

use anvil::chunk::ChunkData;
use anvil::color::{ColorTable, StaticColorTable};
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

fn section(y: i8, blocks: Vec<i8>) -> TagValue {
    int_compound(vec![
        ("Y", TagValue::Byte(y)),
        ("Blocks", TagValue::ByteArray(blocks)),
    ])
}

fn chunk_root(x_pos: i32, z_pos: i32, height_map: Vec<i32>, sections: Vec<TagValue>) -> Vec<NamedTag> {
    let level = int_compound(vec![
        ("xPos", TagValue::Int(x_pos)),
        ("zPos", TagValue::Int(z_pos)),
        ("HeightMap", TagValue::IntArray(height_map)),
        ("Sections", TagValue::List(TagId::Compound, sections)),
    ]);
    vec![NamedTag {
        name: String::new(),
        value: int_compound(vec![("Level", level)]),
    }]
}

#[test]
fn extracts_fields_from_legacy_schema() {
    let mut blocks = vec![0i8; 4096];
    blocks[0] = 5;
    let roots = chunk_root(3, -1, vec![1; 256], vec![section(0, blocks)]);

    let chunk = ChunkData::extract(&roots).expect("extract");
    assert_eq!(chunk.x_pos, 3);
    assert_eq!(chunk.z_pos, -1);
    assert_eq!(chunk.height_map.len(), 256);
    assert_eq!(chunk.sections.len(), 1);
}

#[test]
fn missing_level_is_invalid_chunk() {
    let roots = vec![NamedTag {
        name: String::new(),
        value: int_compound(vec![]),
    }];
    let err = ChunkData::extract(&roots).unwrap_err();
    assert!(matches!(err, anvil::error::ChunkError::InvalidChunk("Level")));
}

#[test]
fn wrong_heightmap_length_is_invalid_chunk() {
    let roots = chunk_root(0, 0, vec![1; 10], vec![]);
    let err = ChunkData::extract(&roots).unwrap_err();
    assert!(matches!(err, anvil::error::ChunkError::InvalidChunk(_)));
}

#[test]
fn surface_block_looks_up_correct_section_and_index() {
    // HeightMap[x=1,z=0] = 17 -> surface at y=16 -> section index 1, local y 0.
    let mut idx = vec![0i32; 256];
    idx[1] = 17;
    let mut blocks_section_1 = vec![0i8; 4096];
    blocks_section_1[1] = 9; // x=1, z=0, local y=0 -> index 1
    let roots = chunk_root(0, 0, idx, vec![section(1, blocks_section_1)]);

    let chunk = ChunkData::extract(&roots).expect("extract");
    assert_eq!(chunk.surface_block_id(1, 0), 9);
}

#[test]
fn surface_block_id_is_not_sign_extended() {
    // Block id 200 is stored as the byte 0xC8, which is negative as an i8.
    let mut idx = vec![0i32; 256];
    idx[0] = 1; // surface at y=0, section 0, local y 0
    let mut blocks = vec![0i8; 4096];
    blocks[0] = 200u8 as i8;
    let roots = chunk_root(0, 0, idx, vec![section(0, blocks)]);

    let chunk = ChunkData::extract(&roots).expect("extract");
    assert_eq!(chunk.surface_block_id(0, 0), 200);
}

#[test]
fn missing_section_treated_as_air() {
    let mut idx = vec![0i32; 256];
    idx[0] = 17; // section index 1, which doesn't exist
    let roots = chunk_root(0, 0, idx, vec![]);

    let chunk = ChunkData::extract(&roots).expect("extract");
    assert_eq!(chunk.surface_block_id(0, 0), anvil::chunk::AIR_BLOCK_ID);
}

#[test]
fn empty_chunk_renders_opaque_black_tile_at_correct_placement() {
    let roots = chunk_root(2, 2, vec![0; 256], vec![]);
    let chunk = ChunkData::extract(&roots).expect("extract");

    let colors = StaticColorTable::new();
    let mut renderer = ClassicRenderer::new(&colors);
    renderer.begin_region("world", "r.0.0", std::path::Path::new("/tmp/unused"));
    renderer.render_chunk(&chunk);

    let (cx, cz) = (fold_chunk_coord(2), fold_chunk_coord(2));
    assert_eq!((cx, cz), (2, 2));

    for z in 0..16u32 {
        for x in 0..16u32 {
            let color = colors.color_of(chunk.surface_block_id(x as usize, z as usize));
            assert_eq!(color, [0, 0, 0]);
        }
    }
}
