//! The block-to-color lookup consumed by the renderer.
//!
//! Loading a real catalog (block ids to RGB, typically from a static table
//! shipped alongside a Minecraft version) is external to this crate; this
//! module only fixes the interface the renderer calls through and provides
//! a minimal in-memory implementation for tests and simple callers.

use std::collections::HashMap;

pub type Rgb = [u8; 3];

/// Color returned for a block id with no entry in the table.
pub const UNKNOWN_COLOR: Rgb = [0, 0, 0];

/// Resolves a legacy numeric block id to the color painted for its surface
/// pixel. Implementations must be safe to share across regions rendered in
/// parallel; `color_of` takes `&self` for exactly that reason.
pub trait ColorTable: Send + Sync {
    fn color_of(&self, block_id: i32) -> Rgb;
}

/// A `ColorTable` backed by a plain map, falling back to
/// [`UNKNOWN_COLOR`] for anything not entered.
#[derive(Debug, Default, Clone)]
pub struct StaticColorTable {
    colors: HashMap<i32, Rgb>,
}

impl StaticColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block_id: i32, color: Rgb) -> &mut Self {
        self.colors.insert(block_id, color);
        self
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (i32, Rgb)>) -> Self {
        Self {
            colors: entries.into_iter().collect(),
        }
    }
}

impl ColorTable for StaticColorTable {
    fn color_of(&self, block_id: i32) -> Rgb {
        self.colors.get(&block_id).copied().unwrap_or(UNKNOWN_COLOR)
    }
}
