//! Discovery of conversion candidates under a root directory

pub mod directory;
pub mod filter;

pub use directory::{check_root, find_candidates, walk_candidates};
pub use filter::{is_conversion_candidate, matches_extension};
