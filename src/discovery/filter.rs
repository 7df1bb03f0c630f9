use std::path::Path;

/// Return true if `file_name` ends with `source_ext`, ignoring ASCII case
pub fn matches_extension(file_name: &str, source_ext: &str) -> bool {
    let (name, ext) = (file_name.as_bytes(), source_ext.as_bytes());
    !ext.is_empty()
        && name.len() >= ext.len()
        && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

/// Return true if the path is a regular file whose name ends with `source_ext`
pub fn is_conversion_candidate(path: &Path, source_ext: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matches_extension(name, source_ext))
}
