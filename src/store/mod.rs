//! Interfaces file persistence.
//!
//! This module provides the configuration store abstraction: reading the
//! ifupdown interfaces file (and the fragments its `source` lines include)
//! into [`Interfaces`], and writing it back whole.

mod file;
mod format;


pub use file::FileInterfacesStore;
pub use format::{Document, Source, SyntaxError, parse, render};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::network::{Adapter, AddressFamily};

/// Errors that can occur while reading or writing the configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read an interfaces file or fragment.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file has invalid syntax.
    #[error("Malformed '{}': {source}", path.display())]
    Syntax {
        /// File containing the error
        path: PathBuf,
        /// Location and reason
        #[source]
        source: SyntaxError,
    },

    /// A `source` pattern is not a valid glob.
    #[error("Invalid source pattern '{pattern}': {reason}")]
    Pattern {
        /// The pattern as written
        pattern: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Failed to write an interfaces file or fragment.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A file pulled in by a `source` or `source-directory` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Location of the fragment.
    pub path: PathBuf,
    /// Parsed contents. Its own include directives are kept but not followed.
    pub document: Document,
}

/// The full interfaces configuration: main file plus included fragments.
///
/// Materialized fresh for every listing or update and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interfaces {
    /// Location of the main interfaces file.
    pub path: PathBuf,
    /// Include directives of the main file, in order.
    pub sources: Vec<Source>,
    /// Adapters defined in the main file, in order.
    pub adapters: Vec<Adapter>,
    /// Included fragments, in include order.
    pub fragments: Vec<Fragment>,
}

impl Interfaces {
    /// Creates a store with the main file's contents and no fragments.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            sources: document.sources,
            adapters: document.adapters,
            fragments: Vec::new(),
        }
    }

    /// Adds an included fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: Fragment) -> Self {
        self.fragments.push(fragment);
        self
    }

    /// Iterates over every adapter: main file first, then each fragment.
    pub fn adapters(&self) -> impl Iterator<Item = &Adapter> {
        self.adapters.iter().chain(
            self.fragments
                .iter()
                .flat_map(|fragment| fragment.document.adapters.iter()),
        )
    }

    /// Finds the first adapter stanza with the given name and family.
    pub fn adapter_mut(&mut self, name: &str, family: AddressFamily) -> Option<&mut Adapter> {
        self.adapters
            .iter_mut()
            .chain(
                self.fragments
                    .iter_mut()
                    .flat_map(|fragment| fragment.document.adapters.iter_mut()),
            )
            .find(|adapter| adapter.is(name, family))
    }

    /// Returns true if any adapter has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.adapters().any(|adapter| adapter.name == name)
    }

    /// Returns the total number of adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters().count()
    }

    /// Returns true if no adapters are configured anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters().next().is_none()
    }

    /// Returns the main file's own contents.
    #[must_use]
    pub fn main_document(&self) -> Document {
        Document {
            sources: self.sources.clone(),
            adapters: self.adapters.clone(),
        }
    }
}

/// Abstraction over the persisted interfaces configuration.
///
/// Implementations read the whole configuration and write it back whole;
/// callers mutate selected adapter fields in between.
///
/// # Testing
///
/// Use [`mock::MockInterfacesStore`] in tests to avoid touching system files.
pub trait InterfacesStore: Send + Sync {
    /// Loads the configuration rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file or a fragment cannot be read or
    /// parsed.
    fn load(&self, path: &Path) -> Result<Interfaces, StoreError>;

    /// Writes the configuration back, the main file to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if a file cannot be written.
    fn save(&self, interfaces: &Interfaces, path: &Path) -> Result<(), StoreError>;
}
