#![deny(unsafe_code)]

pub mod alias;
pub mod normalize;

pub use alias::{AliasMap, FUNCTION_LABEL, HeaderTarget, builtin_labels};
pub use normalize::{
    break_lines, contains_phrase, find_phrase, normalize, normalize_loose, segment_key,
    split_lines,
};
