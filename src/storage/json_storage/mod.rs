//! JSON 文件后端：每个分区一个文件

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error};

use super::{PartitionKind, PartitionStore};
use crate::errors::{Result, TrackerError};

pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// 创建后端，目录不存在时自动创建（失败只记录日志，写入时会再次尝试）
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        if let Err(e) = fs::create_dir_all(&root) {
            error!("Failed to create data directory {}: {}", root.display(), e);
        }
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn partition_path(&self, kind: PartitionKind) -> PathBuf {
        self.root.join(kind.file_name())
    }
}

impl PartitionStore for JsonFileStorage {
    fn read(&self, kind: PartitionKind) -> Result<Option<Vec<u8>>> {
        let path = self.partition_path(kind);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::file_operation(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    // 先写同目录临时文件再原子替换，避免留下截断的分区
    fn write(&self, kind: PartitionKind, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.partition_path(kind);

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| {
            TrackerError::file_operation(format!("Failed to replace {}: {}", path.display(), e.error))
        })?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json ({})", self.root.display())
    }
}
