use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// True when the file name ends with one of `extensions`, ignoring ASCII case.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    extensions.iter().any(|ext| {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        name.len() > ext.len() && name.ends_with(&ext) && name[..name.len() - ext.len()].ends_with('.')
    })
}

/// Walk `dir` recursively and return every matching regular file.
pub fn scan_dir(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| has_extension(path, extensions))
        .collect()
}

/// Explicit files first, then directory hits, with duplicates removed.
pub fn collect_targets(files: &[PathBuf], dirs: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    let scanned = dirs.iter().flat_map(|dir| scan_dir(dir, extensions));
    for path in files.iter().cloned().chain(scanned) {
        if seen.insert(path.clone()) {
            targets.push(path);
        }
    }

    debug!("Collected {} target files", targets.len());
    targets
}
