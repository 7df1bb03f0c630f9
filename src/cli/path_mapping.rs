use std::path::{Path, PathBuf};

/// Map a source image onto its sibling destination by swapping the matched
/// `source_ext` suffix (any case) for `target_ext`.
///
/// Returns `None` when the file name does not end with `source_ext`.
pub fn destination_for(source: &Path, source_ext: &str, target_ext: &str) -> Option<PathBuf> {
    let name = source.file_name()?.to_str()?;
    if !crate::discovery::matches_extension(name, source_ext) {
        return None;
    }
    let stem = &name[..name.len() - source_ext.len()];
    Some(source.with_file_name(format!("{}{}", stem, target_ext)))
}
