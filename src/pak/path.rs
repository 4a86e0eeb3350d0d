#![forbid(unsafe_code)]

use std::path::Path;

use crate::pak::error::BuildError;

/// Turn a walked file path into an archive path relative to the walk root,
/// using `/` as the separator.
pub fn normalize_rel_path(root: &Path, file_path: &Path) -> Result<String, BuildError> {
    let rel = file_path
        .strip_prefix(root)
        .map_err(|_| BuildError::InvalidPath(file_path.to_string_lossy().into_owned()))?;

    let name = normalize_archive_path(&rel.to_string_lossy());
    if name.is_empty() {
        return Err(BuildError::InvalidPath("empty relative path".into()));
    }

    Ok(name)
}

/// Join an archive prefix and a relative path with a single `/`.
pub fn prefixed(prefix: &str, rel: &str) -> String {
    let prefix = normalize_archive_path(prefix);
    if prefix.is_empty() {
        rel.to_string()
    } else {
        format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            rel.trim_start_matches('/')
        )
    }
}

/// Normalize a caller-supplied archive path: forward slashes, no leading `/`.
pub fn normalize_archive_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    p.trim_start_matches('/').to_string()
}
