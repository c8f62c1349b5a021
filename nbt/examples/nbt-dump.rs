//! Takes a path to a gzip- or zlib-compressed NBT file and prints its
//! decoded tag tree.

use std::io::Read;

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    let file = std::fs::File::open(&args[1]).expect("open input file");

    let mut bytes = Vec::new();
    flate2::read::GzDecoder::new(file)
        .read_to_end(&mut bytes)
        .expect("gzip decode");

    let roots = nbt::decode(bytes.as_slice()).expect("decode nbt");
    for root in roots {
        println!("{}: {:#?}", root.name, root.value);
    }
}
