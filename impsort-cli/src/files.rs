//! Expand path arguments (files, directories, glob patterns) into source files.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::Pattern;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Extensions picked up from directories and glob matches.
pub const SOURCE_EXTENSIONS: [&str; 8] = ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Never descended into, besides hidden directories.
const SKIPPED_DIRS: [&str; 1] = ["node_modules"];

/// Sorted, deduplicated source files for `args`.
///
/// Files named explicitly are always included. Directories are walked recursively; `exclude`
/// globs are matched against paths relative to the walked directory.
pub fn collect_files(args: &[String], exclude: &[String]) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let exclude = exclude
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid exclude pattern '{}'", p)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut out = BTreeSet::new();
    for arg in args {
        let path = Utf8Path::new(arg);
        if path.is_file() {
            out.insert(path.to_path_buf());
        } else if path.is_dir() {
            walk(path, path, &exclude, &mut out)?;
        } else if is_glob(arg) {
            expand_glob(arg, &mut out)?;
        } else {
            anyhow::bail!("no such file or directory: {}", arg);
        }
    }

    debug!(files = out.len(), "collected source files");
    Ok(out.into_iter().collect())
}

pub fn is_source_file(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_glob(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

fn expand_glob(pattern: &str, out: &mut BTreeSet<Utf8PathBuf>) -> anyhow::Result<()> {
    let entries = glob::glob(pattern).with_context(|| format!("invalid glob '{}'", pattern))?;
    for entry in entries {
        let path = entry.with_context(|| format!("expand glob '{}'", pattern))?;
        match Utf8PathBuf::from_path_buf(path) {
            Ok(path) if path.is_file() && is_source_file(&path) => {
                out.insert(path);
            }
            Ok(_) => {}
            Err(path) => warn!("skipping non UTF-8 path {}", path.display()),
        }
    }
    Ok(())
}

fn walk(
    root: &Utf8Path,
    dir: &Utf8Path,
    exclude: &[Pattern],
    out: &mut BTreeSet<Utf8PathBuf>,
) -> anyhow::Result<()> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir))? {
        let entry = entry.with_context(|| format!("read dir {}", dir))?;
        match Utf8PathBuf::from_path_buf(entry.path()) {
            Ok(path) => entries.push(path),
            Err(path) => warn!("skipping non UTF-8 path {}", path.display()),
        }
    }
    entries.sort();

    for path in entries {
        let name = path.file_name().unwrap_or_default();
        if path.is_dir() {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name) {
                continue;
            }
            walk(root, &path, exclude, out)?;
        } else if is_source_file(&path) && !is_excluded(root, &path, exclude) {
            out.insert(path);
        }
    }
    Ok(())
}

fn is_excluded(root: &Utf8Path, path: &Utf8Path, exclude: &[Pattern]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.as_str().replace('\\', "/");
    exclude.iter().any(|p| p.matches(&rel))
}
