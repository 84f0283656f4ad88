//! 持久化适配器
//!
//! 负责分区的序列化、按 [`WritePolicy`] 处理读写失败，以及在每次
//! 实体分区写入后刷新设置分区中的计数器镜像。

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use super::partitions::{Partition, SettingsPartition};
use super::{PartitionKind, PartitionStore, WritePolicy};
use crate::config::StorageConfig;
use crate::errors::{Result, TrackerError};
use crate::services::lock;

pub struct PersistenceAdapter {
    backend: Arc<dyn PartitionStore>,
    policy: WritePolicy,
    reconcile_counters: bool,
    settings: Mutex<SettingsPartition>,
    // 启动时读取到的首次运行标记，之后的写入不会改变它
    first_run: bool,
}

impl PersistenceAdapter {
    pub fn new(backend: Arc<dyn PartitionStore>, config: &StorageConfig) -> Result<Self> {
        let mut adapter = Self {
            backend,
            policy: config.write_policy,
            reconcile_counters: config.reconcile_counters,
            settings: Mutex::new(SettingsPartition::default()),
            first_run: true,
        };
        let settings: SettingsPartition = adapter.load()?;
        adapter.first_run = settings.first_run;
        adapter.settings = Mutex::new(settings);
        Ok(adapter)
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn reconciles_counters(&self) -> bool {
        self.reconcile_counters
    }

    pub fn backend(&self) -> &Arc<dyn PartitionStore> {
        &self.backend
    }

    /// 启动时设置分区是否处于首次运行状态
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    /// 当前设置分区的副本
    pub fn settings(&self) -> SettingsPartition {
        lock(&self.settings).clone()
    }

    /// 加载分区
    ///
    /// 分区不存在时返回空分区；无法读取或解析时按写入策略处理。
    pub fn load<P: Partition>(&self) -> Result<P> {
        let kind = P::KIND;
        let bytes = match self.backend.read(kind) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("Partition {} not found, starting empty", kind);
                return Ok(P::default());
            }
            Err(e) => return self.load_failed(kind, e),
        };

        let mut partition: P = match serde_json::from_slice(&bytes) {
            Ok(partition) => partition,
            Err(e) => return self.load_failed(kind, e.into()),
        };

        if self.reconcile_counters && partition.reconcile_counters() {
            warn!(
                "Counter of {} partition was behind its identifiers and has been raised",
                kind
            );
        }
        info!("Loaded {} partition ({} bytes)", kind, bytes.len());
        Ok(partition)
    }

    fn load_failed<P: Partition>(&self, kind: PartitionKind, err: TrackerError) -> Result<P> {
        match self.policy {
            WritePolicy::FailSoft => {
                error!(
                    "Failed to load {} partition, starting empty: {}",
                    kind, err
                );
                Ok(P::default())
            }
            WritePolicy::FailFast => Err(TrackerError::persistence(format!(
                "Failed to load {kind} partition: {err}"
            ))),
        }
    }

    /// 整体写入分区，并刷新设置分区的计数器镜像
    pub fn save<P: Partition>(&self, partition: &P) -> Result<()> {
        let written = self.write_partition(P::KIND, partition);

        let mirrored = {
            let mut settings = lock(&self.settings);
            partition.mirror_into(&mut settings);
            settings.first_run = false;
            if P::KIND == PartitionKind::Settings {
                Ok(())
            } else {
                self.write_partition(PartitionKind::Settings, &*settings)
            }
        };

        written.and(mirrored)
    }

    fn write_partition<P: serde::Serialize>(&self, kind: PartitionKind, value: &P) -> Result<()> {
        let result = serde_json::to_vec_pretty(value)
            .map_err(TrackerError::from)
            .and_then(|bytes| self.backend.write(kind, &bytes));

        match result {
            Ok(()) => Ok(()),
            Err(e) => match self.policy {
                WritePolicy::FailSoft => {
                    error!(
                        "Failed to write {} partition, keeping in-memory state: {}",
                        kind, e
                    );
                    Ok(())
                }
                WritePolicy::FailFast => Err(TrackerError::persistence(format!(
                    "Failed to write {kind} partition: {e}"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::id_allocator::IdAllocator;
    use crate::storage::partitions::CoursesPartition;

    fn config(policy: WritePolicy) -> StorageConfig {
        StorageConfig {
            backend: "memory".into(),
            write_policy: policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_partitions_load_empty() {
        let backend = Arc::new(MemoryStorage::new());
        let adapter = PersistenceAdapter::new(backend, &config(WritePolicy::FailFast)).expect("new");
        assert!(adapter.is_first_run());
        let courses: CoursesPartition = adapter.load().expect("load");
        assert!(courses.courses.is_empty());
        assert_eq!(courses.counter.peek(), 1);
    }

    #[test]
    fn test_corrupt_partition_depends_on_policy() {
        let backend = Arc::new(MemoryStorage::new());
        backend.insert_raw(PartitionKind::Courses, "{not json");

        let soft = PersistenceAdapter::new(backend.clone(), &config(WritePolicy::FailSoft))
            .expect("new");
        let courses: CoursesPartition = soft.load().expect("fail-soft load");
        assert!(courses.courses.is_empty());

        let fast = PersistenceAdapter::new(backend, &config(WritePolicy::FailFast)).expect("new");
        let err = fast.load::<CoursesPartition>().expect_err("fail-fast load");
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_corrupt_settings_fails_construction_under_fail_fast() {
        let backend = Arc::new(MemoryStorage::new());
        backend.insert_raw(PartitionKind::Settings, "{not json");
        let err = PersistenceAdapter::new(backend.clone(), &config(WritePolicy::FailFast))
            .err()
            .expect("fail-fast construction");
        assert_eq!(err.code(), "E004");

        let soft = PersistenceAdapter::new(backend, &config(WritePolicy::FailSoft)).expect("new");
        assert!(soft.is_first_run());
    }

    #[test]
    fn test_write_failure_depends_on_policy() {
        let backend = Arc::new(MemoryStorage::new());
        backend.set_fail_writes(true);
        let courses = CoursesPartition::default();

        let soft = PersistenceAdapter::new(backend.clone(), &config(WritePolicy::FailSoft))
            .expect("new");
        assert!(soft.save(&courses).is_ok());

        let fast = PersistenceAdapter::new(backend, &config(WritePolicy::FailFast)).expect("new");
        assert_eq!(fast.save(&courses).expect_err("fail-fast").code(), "E004");
    }

    #[test]
    fn test_save_refreshes_settings_mirror() {
        let backend = Arc::new(MemoryStorage::new());
        let adapter = PersistenceAdapter::new(backend.clone(), &config(WritePolicy::FailFast))
            .expect("new");
        let courses = CoursesPartition {
            counter: IdAllocator::new(4),
            ..Default::default()
        };
        adapter.save(&courses).expect("save");

        let raw = backend.raw(PartitionKind::Settings).expect("settings written");
        let settings: SettingsPartition = serde_json::from_slice(&raw).expect("decode");
        assert_eq!(settings.course_counter.peek(), 4);
        assert!(!settings.first_run);
        // 首次运行标记只反映启动时的状态
        assert!(adapter.is_first_run());
    }

    #[test]
    fn test_stale_counter_reconciled_only_when_enabled() {
        let backend = Arc::new(MemoryStorage::new());
        backend.insert_raw(
            PartitionKind::Courses,
            r#"{"courses":{"CRS-0003":{"id":"CRS-0003","name":"OOP","code":"CSE-202",
                "department":"CS","credit_hours":3,"semester":"Fall 2024",
                "instructor_id":"TCH-0001","created_at":"2024-09-01T00:00:00Z"}},
                "counter":1}"#,
        );

        let reconciling = PersistenceAdapter::new(backend.clone(), &config(WritePolicy::FailFast))
            .expect("new");
        let courses: CoursesPartition = reconciling.load().expect("load");
        assert_eq!(courses.counter.peek(), 4);

        let trusting = StorageConfig {
            reconcile_counters: false,
            ..config(WritePolicy::FailFast)
        };
        let verbatim = PersistenceAdapter::new(backend, &trusting).expect("new");
        let courses: CoursesPartition = verbatim.load().expect("load");
        assert_eq!(courses.counter.peek(), 1);
    }
}
