use super::DocumentStore;
use crate::error::{DrillError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    documents: HashMap<String, String>,
    writes: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }
}

impl DocumentStore for InMemoryStore {
    fn read_document(&self, name: &str) -> Result<Option<String>> {
        Ok(self.documents.get(name).cloned())
    }

    fn write_document(&mut self, name: &str, content: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(DrillError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        self.documents.insert(name.to_string(), content.to_string());
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Book, Catalog, LinkTable};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_books(mut self, books: &[(&str, &str, u32)]) -> Self {
            let mut catalog: Catalog = self.store.open().unwrap();
            for (title, author, copies) in books {
                catalog
                    .books
                    .push(Book::new(title.to_string(), author.to_string(), *copies));
            }
            self.store.commit(&catalog).unwrap();
            self
        }

        pub fn with_link(mut self, code: &str, url: &str) -> Self {
            let mut table: LinkTable = self.store.open().unwrap();
            table.map.insert(code.to_string(), url.to_string());
            self.store.commit(&table).unwrap();
            self
        }
    }
}
