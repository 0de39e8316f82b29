use std::path::{Component, Path, PathBuf};

/// Last path segment of `input` without its final extension.
///
/// Only `/` separates segments. A name that starts with its only dot
/// (`.ts`) has an empty stem.
pub fn file_stem(input: &str) -> &str {
    let name = match input.rfind('/') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Join `relative` onto `root` and lexically clean the result.
///
/// `.` segments are dropped and `..` pops the previous segment where there is
/// one. A leading `/` in `relative` does not discard `root`.
pub fn join_clean(root: &Path, relative: &str) -> PathBuf {
    let mut out = PathBuf::new();

    for component in root.components().chain(Path::new(relative).components()) {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::RootDir | Component::Prefix(_) => {
                if out.as_os_str().is_empty() {
                    out.push(component);
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Returns the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
