use crate::error::{ActionError, Result};
use std::path::{Component, Path, PathBuf};

/// Resolves `subdir` under `root`, refusing anything that would land outside it.
///
/// Leading `../` (or `..\`) segments are dropped before joining, so
/// `../../etc` under `/work` resolves to `/work/etc`.
pub fn resolve_safe_child_path(root: &Path, subdir: Option<&str>) -> Result<PathBuf> {
    let Some(subdir) = subdir.filter(|subdir| !subdir.is_empty()) else {
        return Ok(root.to_path_buf());
    };

    let relative = strip_leading_traversal(subdir);

    let mut resolved = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(segment) => resolved.push(segment),
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(path_safety_error(root, subdir));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(path_safety_error(root, subdir));
            }
        }
    }

    Ok(root.join(resolved))
}

fn strip_leading_traversal(mut path: &str) -> &str {
    loop {
        if let Some(rest) = path.strip_prefix("../").or_else(|| path.strip_prefix("..\\")) {
            path = rest;
        } else if path == ".." {
            return "";
        } else {
            return path;
        }
    }
}

fn path_safety_error(root: &Path, subdir: &str) -> ActionError {
    ActionError::PathSafety {
        path: root.join(subdir),
    }
}
