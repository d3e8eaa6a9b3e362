// Part-order box: line grammar, codec, and chip edits.

pub mod codec;
pub mod editor;
pub mod grammar;

pub use codec::{count_part_lines, decode};
