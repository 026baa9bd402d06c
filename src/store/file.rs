//! File-based interfaces store implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::format::{self, Document, Source};
use super::{Fragment, Interfaces, InterfacesStore, StoreError};

/// File-based implementation of [`InterfacesStore`].
///
/// # Includes
///
/// `source` patterns and `source-directory` paths are resolved relative to
/// the directory of the main file. Matching files are loaded as fragments in
/// sorted order. Fragments' own include lines are not followed.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Resolve `{path}` through any symlinks to the real file
/// 2. Write to `{file}.tmp` with the permissions of the existing file
/// 3. Rename `{file}.tmp` to `{file}`
///
/// The temp file is removed if any step fails.
///
/// A fragment is only written if its rendered content differs from the
/// file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileInterfacesStore;

impl FileInterfacesStore {
    /// Creates a new file-based store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_document(path: &Path) -> Result<Document, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        format::parse(&content).map_err(|e| StoreError::Syntax {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Lists the files an include directive refers to.
    fn expand(source: &Source, base: &Path) -> Result<Vec<PathBuf>, StoreError> {
        let resolved = base.join(source.pattern());

        match source {
            Source::Glob(pattern) => {
                let resolved = resolved.to_string_lossy();
                let entries = glob::glob(&resolved).map_err(|e| StoreError::Pattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;

                let mut paths = Vec::new();
                for entry in entries {
                    let path = entry.map_err(|e| StoreError::Read {
                        path: e.path().to_path_buf(),
                        source: e.into(),
                    })?;
                    if path.is_file() {
                        paths.push(path);
                    }
                }
                paths.sort();
                Ok(paths)
            }
            Source::Directory(_) => {
                let entries = match std::fs::read_dir(&resolved) {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        tracing::warn!("source-directory {} does not exist", resolved.display());
                        return Ok(Vec::new());
                    }
                    Err(e) => {
                        return Err(StoreError::Read {
                            path: resolved,
                            source: e,
                        });
                    }
                };

                let mut paths = Vec::new();
                for entry in entries {
                    let entry = entry.map_err(|e| StoreError::Read {
                        path: resolved.clone(),
                        source: e,
                    })?;
                    let path = entry.path();
                    let eligible = entry.file_name().to_str().is_some_and(is_fragment_name);
                    if eligible && path.is_file() {
                        paths.push(path);
                    }
                }
                paths.sort();
                Ok(paths)
            }
        }
    }

    fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
        let to_error = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Replace the file a symlink points to, not the link.
        let target = match std::fs::canonicalize(path) {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
            Err(e) => return Err(to_error(e)),
        };
        let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., interfaces.d/lan.cfg -> lan.cfg.tmp, not lan.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", target.display()));

        let result = std::fs::write(&temp_path, content)
            .and_then(|()| match permissions {
                Some(permissions) => std::fs::set_permissions(&temp_path, permissions),
                None => Ok(()),
            })
            .and_then(|()| std::fs::rename(&temp_path, &target));

        if let Err(e) = result {
            match std::fs::remove_file(&temp_path) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    tracing::warn!("Could not remove {}: {cleanup}", temp_path.display());
                }
                _ => {}
            }
            return Err(to_error(e));
        }
        Ok(())
    }
}

/// Names `source-directory` includes: letters, digits, `_` and `-` only.
fn is_fragment_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl InterfacesStore for FileInterfacesStore {
    fn load(&self, path: &Path) -> Result<Interfaces, StoreError> {
        let document = Self::read_document(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("/"));

        let mut fragment_paths = Vec::new();
        for source in &document.sources {
            fragment_paths.extend(Self::expand(source, base)?);
        }

        let mut interfaces = Interfaces::new(path, document);
        for fragment_path in fragment_paths {
            tracing::debug!("Loading fragment {}", fragment_path.display());
            let document = Self::read_document(&fragment_path)?;
            interfaces = interfaces.with_fragment(Fragment {
                path: fragment_path,
                document,
            });
        }

        tracing::debug!(
            "Loaded {} adapter(s) from {} ({} fragment(s))",
            interfaces.len(),
            path.display(),
            interfaces.fragments.len()
        );
        Ok(interfaces)
    }

    fn save(&self, interfaces: &Interfaces, path: &Path) -> Result<(), StoreError> {
        Self::write_atomic(path, &format::render(&interfaces.main_document()))?;

        for fragment in &interfaces.fragments {
            let content = format::render(&fragment.document);
            let unchanged = std::fs::read_to_string(&fragment.path)
                .is_ok_and(|existing| existing == content);
            if unchanged {
                continue;
            }
            tracing::debug!("Rewriting fragment {}", fragment.path.display());
            Self::write_atomic(&fragment.path, &content)?;
        }

        Ok(())
    }
}
