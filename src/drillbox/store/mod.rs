//! # Storage Layer
//!
//! Every stateful drill keeps its records in one named JSON document. The
//! [`DocumentStore`] trait is the only contract the services see.
//!
//! ## Contract
//!
//! - [`DocumentStore::load_or_init`] returns the persisted document, or writes
//!   the supplied default and returns it when nothing is stored yet. Calling it
//!   again without a save in between returns an equal document.
//! - [`DocumentStore::save`] serializes the whole document and replaces the
//!   previous content. There is no merging.
//!
//! Implementations only move strings in and out; they know nothing about the
//! record shapes.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<name>.json` file per document, replaced by
//!   write-then-rename.
//! - [`memory::InMemoryStore`]: a map of documents for tests.
//!
//! ## Concurrency
//!
//! Services load, mutate in memory, then save. Nothing isolates the load
//! from the save, so two processes writing the same document race and the
//! last save wins. The store assumes a single writer.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── books.json          # { "books": [...] }
//! ├── urls.json           # { "map": { code: url } }
//! ├── calc_history.json   # { "history": [...] }
//! └── config.json         # DrillConfig
//! ```

use crate::error::Result;
use crate::model::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub mod fs;
pub mod memory;

/// Abstract interface for named document persistence.
pub trait DocumentStore {
    /// Raw content of the named document, or `None` if it was never written.
    fn read_document(&self, name: &str) -> Result<Option<String>>;

    /// Replace the named document with `content`.
    fn write_document(&mut self, name: &str, content: &str) -> Result<()>;

    fn load_or_init<T>(&mut self, name: &str, default: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        Self: Sized,
    {
        match self.read_document(name)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                debug!(document = name, "initializing document with default shape");
                self.save(name, &default)?;
                Ok(default)
            }
        }
    }

    fn save<T>(&mut self, name: &str, document: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let content = serde_json::to_string_pretty(document)?;
        self.write_document(name, &content)
    }

    /// Load a typed document under its own name, creating it if absent.
    fn open<D: Document>(&mut self) -> Result<D>
    where
        Self: Sized,
    {
        self.load_or_init(D::NAME, D::default())
    }

    /// Persist a typed document under its own name.
    fn commit<D: Document>(&mut self, document: &D) -> Result<()>
    where
        Self: Sized,
    {
        self.save(D::NAME, document)
    }
}
