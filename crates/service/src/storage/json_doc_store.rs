use std::{marker::PhantomData, path::{Path, PathBuf}};
use tokio::fs;

use crate::errors::ServiceError;

/// Generic JSON file-backed document store.
///
/// Holds no copy of the document: every `load` re-reads and parses the file and
/// every `save` rewrites it in full. Concurrent writers are not coordinated here;
/// callers that need read-modify-write safety serialise access themselves.
#[derive(Debug, Clone)]
pub struct JsonDocStore<T> {
    file_path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Open a store at `path`. Creates the parent directory and writes `seed`
    /// if the file does not exist yet; an existing file is left untouched.
    pub async fn open<P: Into<PathBuf>>(path: P, seed: &T) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, serde_json::to_vec(seed)?).await?;
            tracing::info!(path = %file_path.display(), "seeded empty document store");
        }

        Ok(Self { file_path, _doc: PhantomData })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<T, ServiceError> {
        let bytes = fs::read(&self.file_path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serialize the whole document and overwrite the file.
    pub async fn save(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(doc)?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempPath;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn open_seeds_missing_file_and_persists() -> Result<(), anyhow::Error> {
        let dir = TempPath::dir("json_doc_store");
        let tmp = dir.path().join("doc.json");
        let store = JsonDocStore::<BTreeMap<String, u32>>::open(&tmp, &BTreeMap::new()).await?;
        assert!(store.load().await?.is_empty());

        let mut doc = store.load().await?;
        doc.insert("a".into(), 1);
        store.save(&doc).await?;

        // reopening keeps existing content instead of reseeding
        let reopened = JsonDocStore::<BTreeMap<String, u32>>::open(&tmp, &BTreeMap::new()).await?;
        assert_eq!(reopened.load().await?.get("a"), Some(&1));

        Ok(())
    }

    #[tokio::test]
    async fn load_surfaces_missing_and_corrupt_files() -> Result<(), anyhow::Error> {
        let dir = TempPath::dir("json_doc_store");
        let tmp = dir.path().join("doc.json");
        let store = JsonDocStore::<Vec<u32>>::open(&tmp, &Vec::new()).await?;

        fs::write(&tmp, b"{not json").await?;
        assert!(matches!(store.load().await, Err(ServiceError::Serialization(_))));

        fs::remove_file(&tmp).await?;
        assert!(matches!(store.load().await, Err(ServiceError::Storage(_))));

        Ok(())
    }
}
