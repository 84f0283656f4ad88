//! 分区的持久化形态
//!
//! 每个分区是一个以 ID 为键的扁平集合加上各自的计数器，整体读写。
//! 跨分区的引用只保存 ID。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::PartitionKind;
use super::id_allocator::IdAllocator;
use crate::models::{
    assignments::entities::Assignment, courses::entities::Course,
    submissions::entities::Submission, users::entities::User,
};

pub trait Partition: Serialize + DeserializeOwned + Default + Send {
    const KIND: PartitionKind;

    /// 用分区内已有的 ID 校正计数器，返回是否发生调整
    fn reconcile_counters(&mut self) -> bool;

    /// 将本分区的计数器同步到设置分区
    fn mirror_into(&self, settings: &mut SettingsPartition);
}

/// 用户分区：教师与学生共用一个计数器
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersPartition {
    pub users: BTreeMap<String, User>,
    pub counter: IdAllocator,
}

impl Partition for UsersPartition {
    const KIND: PartitionKind = PartitionKind::Users;

    fn reconcile_counters(&mut self) -> bool {
        self.counter.reconcile(self.users.keys().map(String::as_str))
    }

    fn mirror_into(&self, settings: &mut SettingsPartition) {
        settings.user_counter = self.counter;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursesPartition {
    pub courses: BTreeMap<String, Course>,
    pub counter: IdAllocator,
}

impl Partition for CoursesPartition {
    const KIND: PartitionKind = PartitionKind::Courses;

    fn reconcile_counters(&mut self) -> bool {
        self.counter.reconcile(self.courses.keys().map(String::as_str))
    }

    fn mirror_into(&self, settings: &mut SettingsPartition) {
        settings.course_counter = self.counter;
    }
}

/// 作业与提交共存于同一分区，各自一个计数器
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentsPartition {
    pub assignments: BTreeMap<String, Assignment>,
    pub submissions: BTreeMap<String, Submission>,
    pub assignment_counter: IdAllocator,
    pub submission_counter: IdAllocator,
}

impl Partition for AssignmentsPartition {
    const KIND: PartitionKind = PartitionKind::Assignments;

    fn reconcile_counters(&mut self) -> bool {
        let assignments = self
            .assignment_counter
            .reconcile(self.assignments.keys().map(String::as_str));
        let submissions = self
            .submission_counter
            .reconcile(self.submissions.keys().map(String::as_str));
        assignments || submissions
    }

    fn mirror_into(&self, settings: &mut SettingsPartition) {
        settings.assignment_counter = self.assignment_counter;
        settings.submission_counter = self.submission_counter;
    }
}

/// 设置分区：各计数器的镜像与首次运行标记
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPartition {
    pub user_counter: IdAllocator,
    pub course_counter: IdAllocator,
    pub assignment_counter: IdAllocator,
    pub submission_counter: IdAllocator,
    pub first_run: bool,
}

impl Default for SettingsPartition {
    fn default() -> Self {
        Self {
            user_counter: IdAllocator::default(),
            course_counter: IdAllocator::default(),
            assignment_counter: IdAllocator::default(),
            submission_counter: IdAllocator::default(),
            first_run: true,
        }
    }
}

impl Partition for SettingsPartition {
    const KIND: PartitionKind = PartitionKind::Settings;

    fn reconcile_counters(&mut self) -> bool {
        false
    }

    fn mirror_into(&self, settings: &mut SettingsPartition) {
        settings.clone_from(self);
    }
}
