use crate::errors::LoadError;
use crate::hasher::{HashToken, TokenHasher};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Reverse lookup from hash token to the name that produced it.
///
/// Built once and never mutated afterwards, so a shared reference can be
/// handed to every worker without locking.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    entries: HashMap<HashToken, String>,
    collisions: usize,
}

impl NameTable {
    /// Build a table from raw source lines.
    ///
    /// Lines are trimmed and blank ones skipped. When two different names
    /// hash to the same token the later line wins.
    pub fn from_lines<I, S, H>(lines: I, hasher: &H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        H: TokenHasher + ?Sized,
    {
        let mut entries: HashMap<HashToken, String> = HashMap::new();
        let mut collisions = 0;

        for line in lines {
            let name = line.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            let token = hasher.token(name);
            if let Some(previous) = entries.insert(token.clone(), name.to_string()) {
                if previous != name {
                    collisions += 1;
                    warn!("Hash collision on {}: '{}' replaced by '{}'", token, previous, name);
                }
            }
        }

        Self { entries, collisions }
    }

    /// Read a UTF-8 name list from disk and build the table.
    pub fn load<P, H>(path: P, hasher: &H) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
        H: TokenHasher + ?Sized,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // A lone '\r' ends a line as well
        let table = Self::from_lines(content.split(['\r', '\n']), hasher);
        info!(
            "Loaded {} entries from name table {} ({} collisions)",
            table.len(),
            path.display(),
            table.collisions
        );
        Ok(table)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries overwritten by a later, different name
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
