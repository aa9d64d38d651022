//! File-backed cart storage.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use boxcart::items::CartLineItem;

use super::{LocalCartStore, StoreError};

/// Cart storage keeping one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    dir: PathBuf,
}

impl FileCartStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the carts are kept in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LocalCartStore for FileCartStore {
    fn get(&self, key: &str) -> Result<Option<Vec<CartLineItem>>, StoreError> {
        let bytes = match fs::read(self.path(key)) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn set(&self, key: &str, items: &[CartLineItem]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path(key);
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&staging, &path)?;

        debug!(path = %path.display(), lines = items.len(), "saved local cart");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::{local_line, server_line};

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileCartStore::new(dir.path());

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn set_then_get_keeps_line_kinds() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileCartStore::new(dir.path().join("nested"));
        let lines = vec![local_line("BRG-6204", 2), server_line("CLM-M8", 1)];

        store.set("cart", &lines)?;

        assert_eq!(store.get("cart")?, Some(lines));

        Ok(())
    }

    #[test]
    fn set_replaces_the_whole_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileCartStore::new(dir.path());

        store.set("cart", &[local_line("A", 1), local_line("B", 1)])?;
        store.set("cart", &[local_line("C", 3)])?;

        let stored = store.get("cart")?.ok_or("expected a cart")?;

        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().map(|line| line.code.as_str()), Some("C"));

        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("cart.json"), b"{ not json")?;

        let result = FileCartStore::new(dir.path()).get("cart");

        assert!(
            matches!(result, Err(StoreError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );

        Ok(())
    }
}
