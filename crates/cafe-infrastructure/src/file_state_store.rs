//! File-backed state store.
//!
//! One pretty-printed JSON file per conversation. Writes go to a temporary
//! file in the same directory, are synced, then renamed over the target so a
//! crash never leaves a half-written state file behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cafe_core::error::{CafeError, Result};
use cafe_core::state::{ConversationData, StateStore};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Stores each conversation in `<dir>/<sanitized id>.json`.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Maps a conversation id onto a safe file name.
    ///
    /// Characters outside `[A-Za-z0-9_-]` become `_`, so ids cannot escape
    /// the directory.
    pub fn file_name(conversation_id: &str) -> String {
        let stem: String = conversation_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "_".to_string() } else { stem };
        format!("{}.json", stem)
    }

    fn path_for(&self, conversation_id: &str) -> PathBuf {
        self.dir.join(Self::file_name(conversation_id))
    }

    fn temp_path_for(path: &Path) -> PathBuf {
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<ConversationData>> {
        let path = self.path_for(conversation_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            warn!(path = %path.display(), "empty state file, starting fresh");
            return Ok(None);
        }

        let data = serde_json::from_str(&content).map_err(|e| CafeError::Serialization {
            format: "JSON".to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(Some(data))
    }

    async fn save(&self, conversation_id: &str, data: &ConversationData) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(conversation_id);
        let temp_path = Self::temp_path_for(&path);
        let json = serde_json::to_string_pretty(data)?;

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &path).await.map_err(|e| {
            CafeError::data_access(format!(
                "Failed to move {} into place: {}",
                temp_path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "saved conversation state");
        Ok(())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        match fs::remove_file(self.path_for(conversation_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_sanitized() {
        assert_eq!(FileStateStore::file_name("console"), "console.json");
        assert_eq!(FileStateStore::file_name("../etc/passwd"), "___etc_passwd.json");
        assert_eq!(FileStateStore::file_name("a:b c"), "a_b_c.json");
        assert_eq!(FileStateStore::file_name(""), "_.json");
    }
}
