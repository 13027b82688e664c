use super::DocumentStore;
use crate::error::{DrillError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DrillError::Io)?;
        }
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn read_document(&self, name: &str) -> Result<Option<String>> {
        let path = self.document_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(DrillError::Io)?;
        debug!(path = %path.display(), bytes = content.len(), "read document");
        Ok(Some(content))
    }

    fn write_document(&mut self, name: &str, content: &str) -> Result<()> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(DrillError::Store(format!("Invalid document name: {:?}", name)));
        }
        self.ensure_dir()?;

        let path = self.document_path(name);
        let tmp_path = self.root.join(format!(".{}.json.tmp", name));

        // Readers see either the old or the new document, never a partial one
        if let Err(e) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DrillError::Io(e));
        }
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DrillError::Io(e)
        })?;

        debug!(path = %path.display(), bytes = content.len(), "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_names_escaping_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());
        assert!(store.write_document("../books", "{}").is_err());
        assert!(store.write_document("", "{}").is_err());
    }

    #[test]
    fn missing_document_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-yet"));
        assert_eq!(store.read_document("books").unwrap(), None);
    }
}
