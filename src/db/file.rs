use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueSlot, StorageKey};
use crate::error::AppResult;

/// Slot backed by one JSON file per key inside a data directory
///
/// Writes go to a sibling temp file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the value for `key`
    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait::async_trait]
impl KeyValueSlot for FileSlot {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        tokio::fs::write(&tmp, value.as_bytes()).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(path = %target.display(), bytes = value.len(), "Slot written");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());
        assert_eq!(slot.get(&StorageKey::Favorites).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("data"));

        slot.set(&StorageKey::Favorites, r#"[{"id":1}]"#.to_string())
            .await
            .unwrap();

        let path = slot.path_for(&StorageKey::Favorites);
        assert!(path.ends_with("movie-explorer-favorites.json"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"[{"id":1}]"#
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());

        slot.set(&StorageKey::Favorites, "first".to_string())
            .await
            .unwrap();
        slot.set(&StorageKey::Favorites, "second".to_string())
            .await
            .unwrap();

        assert_eq!(
            slot.get(&StorageKey::Favorites).await.unwrap().as_deref(),
            Some("second")
        );
    }
}
