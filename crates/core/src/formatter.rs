use crate::error::{ModlistError, Result};
use std::path::{Component, Path};

/// Delimiter placed between identifier segments.
pub const SEPARATOR: &str = ".";

/// Turn `path` into a dotted module identifier.
///
/// `prefix` is removed from the front, `suffix` from the end, and every
/// remaining directory boundary becomes a `.`. A leading `./` on either
/// `path` or `prefix` is ignored, as are trailing slashes.
pub fn module_identifier(path: &Path, prefix: &Path, suffix: &str) -> Result<String> {
    let relative = without_cur_dir(path)
        .strip_prefix(without_cur_dir(prefix))
        .map_err(|_| ModlistError::format(path, format!("not under {}", prefix.display())))?;

    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    joined
        .strip_suffix(suffix)
        .map(str::to_string)
        .ok_or_else(|| ModlistError::format(path, format!("does not end with {suffix}")))
}

fn without_cur_dir(path: &Path) -> &Path {
    let mut components = path.components();
    while components.clone().next() == Some(Component::CurDir) {
        components.next();
    }
    components.as_path()
}
