//! 内存后端
//!
//! 与文件后端走相同的序列化路径。多个服务实例共享同一个
//! `Arc<MemoryStorage>` 即可模拟进程重启。

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{PartitionKind, PartitionStore};
use crate::errors::{Result, TrackerError};
use crate::services::lock;

#[derive(Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<PartitionKind, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟磁盘故障：开启后所有写入返回错误
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 直接放入原始字节，绕过序列化
    pub fn insert_raw(&self, kind: PartitionKind, bytes: impl Into<Vec<u8>>) {
        lock(&self.blobs).insert(kind, bytes.into());
    }

    pub fn raw(&self, kind: PartitionKind) -> Option<Vec<u8>> {
        lock(&self.blobs).get(&kind).cloned()
    }
}

impl PartitionStore for MemoryStorage {
    fn read(&self, kind: PartitionKind) -> Result<Option<Vec<u8>>> {
        Ok(self.raw(kind))
    }

    fn write(&self, kind: PartitionKind, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::file_operation(format!(
                "Simulated write failure for {kind} partition"
            )));
        }
        self.insert_raw(kind, bytes);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
