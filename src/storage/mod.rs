//! 分区存储
//!
//! 后端只负责按分区读写整块字节，序列化与写入策略由 [`adapter`] 处理。

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{Result, TrackerError};

pub mod adapter;
pub mod id_allocator;
pub mod json_storage;
pub mod memory_storage;
pub mod partitions;

pub use crate::config::WritePolicy;
pub use adapter::PersistenceAdapter;
pub use json_storage::JsonFileStorage;
pub use memory_storage::MemoryStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartitionKind {
    Users,
    Courses,
    Assignments,
    Settings,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 4] = [
        PartitionKind::Users,
        PartitionKind::Courses,
        PartitionKind::Assignments,
        PartitionKind::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionKind::Users => "users",
            PartitionKind::Courses => "courses",
            PartitionKind::Assignments => "assignments",
            PartitionKind::Settings => "settings",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            PartitionKind::Users => "users.json",
            PartitionKind::Courses => "courses.json",
            PartitionKind::Assignments => "assignments.json",
            PartitionKind::Settings => "settings.json",
        }
    }
}

impl std::fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub trait PartitionStore: Send + Sync {
    /// 读取整个分区；分区尚不存在时返回 `Ok(None)`
    fn read(&self, kind: PartitionKind) -> Result<Option<Vec<u8>>>;
    /// 整体覆盖写入分区
    fn write(&self, kind: PartitionKind, bytes: &[u8]) -> Result<()>;
    /// 后端描述，用于日志
    fn describe(&self) -> String;
}

/// 根据配置创建存储后端
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn PartitionStore>> {
    let backend: Arc<dyn PartitionStore> = match config.backend.to_ascii_lowercase().as_str() {
        "json" => Arc::new(JsonFileStorage::new(&config.data_dir)),
        "memory" => Arc::new(MemoryStorage::new()),
        other => {
            return Err(TrackerError::config(format!(
                "Unknown storage backend '{other}', expected json or memory"
            )));
        }
    };
    info!("Using {} storage backend", backend.describe());
    Ok(backend)
}
