//! File Artifact Store - 文件系统音频存储实现
//!
//! 实现 ArtifactStorePort trait。文件名由缓存 key 决定，
//! 同名写入互相覆盖（内容由 key 决定，覆盖无害）

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

use crate::application::ports::{ArtifactStorePort, StoreError};

use super::wav;

/// 缓存文件名前缀
const ARTIFACT_PREFIX: &str = "gemini_";

/// 缓存文件扩展名
const ARTIFACT_SUFFIX: &str = ".wav";

/// 文件系统音频存储
pub struct FileArtifactStore {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileArtifactStore {
    /// 创建新的文件存储，确保目录存在
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn is_artifact_name(name: &str) -> bool {
        name.starts_with(ARTIFACT_PREFIX) && name.ends_with(ARTIFACT_SUFFIX)
    }
}

#[async_trait]
impl ArtifactStorePort for FileArtifactStore {
    fn path_for(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    async fn exists(&self, filename: &str) -> bool {
        self.path_for(filename).exists()
    }

    async fn save_pcm_as_wav(&self, filename: &str, pcm: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.path_for(filename);
        let wav_data = wav::encode_default(pcm);

        fs::write(&path, &wav_data)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            pcm_size = pcm.len(),
            wav_size = wav_data.len(),
            "Saved PCM data as WAV file"
        );

        Ok(path)
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(filename);

        if !path.exists() {
            return Err(StoreError::NotFound(path.to_string_lossy().to_string()));
        }

        fs::read(&path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))
    }

    async fn trim(&self, keep_newest: usize) -> Result<usize, StoreError> {
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let mut files: Vec<(PathBuf, SystemTime)> = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !Self::is_artifact_name(name) {
                continue;
            }

            // 创建时间不可用时退回修改时间
            let created = match entry.metadata().await {
                Ok(meta) => meta
                    .created()
                    .or_else(|_| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH),
                Err(_) => SystemTime::UNIX_EPOCH,
            };

            files.push((entry.path(), created));
        }

        if files.len() <= keep_newest {
            return Ok(0);
        }

        // 按创建时间降序，保留最新的 keep_newest 个
        files.sort_by(|a, b| b.1.cmp(&a.1));

        let mut deleted = 0usize;
        for (path, _) in files.split_off(keep_newest) {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Deleted old audio file");
                    deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to delete old audio file"
                    );
                }
            }
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_and_read() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        let pcm = vec![1u8, 2, 3, 4];
        let path = store
            .save_pcm_as_wav("gemini_abc.wav", &pcm)
            .await
            .unwrap();
        assert!(path.exists());

        let data = store.read("gemini_abc.wav").await.unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[44..], pcm.as_slice());
    }

    #[tokio::test]
    async fn test_exists() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        assert!(!store.exists("gemini_missing.wav").await);
        store.save_pcm_as_wav("gemini_x.wav", b"data").await.unwrap();
        assert!(store.exists("gemini_x.wav").await);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        let err = store.read("gemini_missing.wav").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_trim_keeps_newest_files() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        // 150 个文件，修改时间按写入顺序递增
        for i in 0..150 {
            store
                .save_pcm_as_wav(&format!("gemini_{:03}.wav", i), b"pcm")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let deleted = store.trim(100).await.unwrap();
        assert_eq!(deleted, 50);

        // 最旧的 50 个被删除，最新的 100 个保留
        for i in 0..50 {
            assert!(!store.exists(&format!("gemini_{:03}.wav", i)).await);
        }
        for i in 50..150 {
            assert!(store.exists(&format!("gemini_{:03}.wav", i)).await);
        }
    }

    #[tokio::test]
    async fn test_trim_noop_under_limit() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        for i in 0..5 {
            store
                .save_pcm_as_wav(&format!("gemini_{}.wav", i), b"pcm")
                .await
                .unwrap();
        }

        assert_eq!(store.trim(100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_trim_ignores_unrelated_files() {
        let temp = tempdir().unwrap();
        let store = FileArtifactStore::new(temp.path()).await.unwrap();

        fs::write(temp.path().join("notes.txt"), b"keep me")
            .await
            .unwrap();
        for i in 0..3 {
            store
                .save_pcm_as_wav(&format!("gemini_{}.wav", i), b"pcm")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        let deleted = store.trim(1).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(temp.path().join("notes.txt").exists());
    }
}
