use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::discovery::filter::matches_extension;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

/// Check that `root` exists and is a directory we can walk.
pub fn check_root(root: &Path) -> ConversionResult<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConversionError::conversion(ConversionErrorKind::Walk {
            message: format!("not a directory: {}", root.display()),
            path: Some(root.to_path_buf()),
        })),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ConversionError::conversion(
            ConversionErrorKind::RootNotFound {
                path: root.to_path_buf(),
            },
        )),
        Err(e) => Err(ConversionError::conversion_with_source(
            ConversionErrorKind::Walk {
                message: format!("cannot read {}", root.display()),
                path: Some(root.to_path_buf()),
            },
            e.into(),
        )),
    }
}

/// Lazily walk `root` depth-first, yielding conversion candidates in the
/// order the filesystem enumerates them. Subdirectories are descended into
/// as soon as they are encountered.
///
/// Symlinks are followed so a link reports what it points at. Any error
/// reading a directory ends the walk for the caller: it is yielded once and
/// the caller is expected to stop.
pub fn walk_candidates<'a>(
    root: &Path,
    source_ext: &'a str,
) -> impl Iterator<Item = ConversionResult<PathBuf>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_dir() {
                    debug!(dir = %entry.path().display(), "entering directory");
                    return None;
                }
                let is_candidate = entry.file_type().is_file()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| matches_extension(name, source_ext));
                is_candidate.then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(walk_error(e))),
        })
}

/// Collect every conversion candidate under `root`, failing on the first
/// directory that cannot be read.
pub fn find_candidates(root: &Path, source_ext: &str) -> ConversionResult<Vec<PathBuf>> {
    check_root(root)?;
    walk_candidates(root, source_ext).collect()
}

fn walk_error(e: walkdir::Error) -> ConversionError {
    let path = e.path().map(Path::to_path_buf);
    let message = match (e.loop_ancestor(), &path) {
        (Some(ancestor), Some(path)) => format!(
            "symlink loop at {} (points to {})",
            path.display(),
            ancestor.display()
        ),
        (_, Some(path)) => format!("cannot read {}", path.display()),
        (_, None) => "cannot read directory".to_string(),
    };
    ConversionError::conversion_with_source(ConversionErrorKind::Walk { message, path }, e.into())
}
