//! File-backed updater: the load/save collaborator around the core engine
//!
//! I/O is asynchronous and strictly bracketed around the synchronous tree
//! operations: a document is fully read before parsing, and fully rendered
//! before writing.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::result::Result;
use crate::updater::Updater;

/// An [`Updater`] bound to a file path.
///
/// Dereferences to [`Updater`], so the whole editing API is available on it
/// directly.
#[derive(Debug)]
pub struct FileUpdater {
    updater: Updater,
    path: PathBuf,
}

impl FileUpdater {
    /// Read and parse the document at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = tokio::fs::read_to_string(&path).await?;
        debug!(path = %path.display(), bytes = text.len(), "loaded document");
        let updater = Updater::new(&text)?;
        Ok(Self { updater, path })
    }

    /// Render the current tree and write it back to the bound path.
    pub async fn save(&self) -> Result<()> {
        let text = self.updater.to_text()?;
        tokio::fs::write(&self.path, &text).await?;
        debug!(path = %self.path.display(), bytes = text.len(), "saved document");
        Ok(())
    }

    /// The path this document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Redirect future saves to a different path
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }
}

impl Deref for FileUpdater {
    type Target = Updater;

    fn deref(&self) -> &Updater {
        &self.updater
    }
}

impl DerefMut for FileUpdater {
    fn deref_mut(&mut self) -> &mut Updater {
        &mut self.updater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::patch::PatchValue;
    use serde_json::json;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[tokio::test]
    async fn load_edit_save_round_trip() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{\n  \"name\": \"demo\", // keep\n  \"port\": 8080\n}\n")
            .await
            .unwrap();

        let mut updater = FileUpdater::load(&path).await.unwrap();
        let patch = PatchValue::from(json!({"port": 9090, "debug": true}))
            .into_object()
            .unwrap();
        updater.update(&patch).unwrap();
        updater.save().await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            written,
            "{\n  \"name\": \"demo\", // keep\n  \"port\": 9090,\n  \"debug\": true\n}\n"
        );
    }

    #[tokio::test]
    async fn save_to_redirected_path() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.json");
        let target = dir.path().join("b.json");
        tokio::fs::write(&source, "{\"x\":1}").await.unwrap();

        let mut updater = FileUpdater::load(&source).await.unwrap();
        assert_eq!(updater.path(), source);
        updater.set_path(&target);
        updater.save().await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&target).await.unwrap(), "{\"x\":1}");
        // the original file is untouched
        assert_eq!(tokio::fs::read_to_string(&source).await.unwrap(), "{\"x\":1}");
    }

    #[tokio::test]
    async fn load_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileUpdater::load(dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[tokio::test]
    async fn load_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{").await.unwrap();
        let err = FileUpdater::load(&path).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
