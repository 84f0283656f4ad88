//! 内存中的实体存储
//!
//! 每种实体只有一个存储拥有它，跨存储的关系只保存 ID。

use std::collections::BTreeSet;

use tracing::warn;

use crate::models::users::entities::{Student, Teacher, User, UserRole};
use crate::storage::partitions::{AssignmentsPartition, CoursesPartition, UsersPartition};

pub type CourseStore = CoursesPartition;
pub type AssignmentStore = AssignmentsPartition;

/// 用户存储：主索引加按角色划分的二级索引
#[derive(Debug, Default)]
pub struct UserStore {
    partition: UsersPartition,
    teachers: BTreeSet<String>,
    students: BTreeSet<String>,
}

impl UserStore {
    pub fn from_partition(partition: UsersPartition) -> Self {
        let mut store = Self {
            partition,
            teachers: BTreeSet::new(),
            students: BTreeSet::new(),
        };
        let ids: Vec<(String, UserRole)> = store
            .partition
            .users
            .values()
            .map(|user| (user.id().to_string(), user.role()))
            .collect();
        for (id, role) in ids {
            store.index(id, role);
        }
        store
    }

    fn index(&mut self, id: String, role: UserRole) {
        match role {
            UserRole::Teacher => self.teachers.insert(id),
            UserRole::Student => self.students.insert(id),
        };
    }

    pub fn partition(&self) -> &UsersPartition {
        &self.partition
    }

    /// 分配新用户 ID，教师与学生共用计数器
    pub fn allocate_id(&mut self, role: UserRole) -> String {
        let id = self.partition.counter.allocate(role.id_prefix());
        if self.partition.users.contains_key(&id) {
            warn!("Allocated user id {} already exists, counter is stale", id);
        }
        id
    }

    pub fn insert(&mut self, user: User) {
        let id = user.id().to_string();
        let role = user.role();
        // 同 ID 覆盖时先清理旧的角色索引
        if let Some(old) = self.partition.users.insert(id.clone(), user) {
            self.teachers.remove(old.id());
            self.students.remove(old.id());
        }
        self.index(id, role);
    }

    /// 从主索引和角色索引中移除
    pub fn remove(&mut self, id: &str) -> Option<User> {
        let user = self.partition.users.remove(id)?;
        match user.role() {
            UserRole::Teacher => self.teachers.remove(id),
            UserRole::Student => self.students.remove(id),
        };
        Some(user)
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.partition.users.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut User> {
        self.partition.users.get_mut(id)
    }

    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.get(id).and_then(User::as_teacher)
    }

    pub fn teacher_mut(&mut self, id: &str) -> Option<&mut Teacher> {
        self.get_mut(id).and_then(User::as_teacher_mut)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.get(id).and_then(User::as_student)
    }

    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.get_mut(id).and_then(User::as_student_mut)
    }

    /// 按邮箱查找（忽略大小写和首尾空白）
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.partition
            .users
            .values()
            .find(|user| user.email().eq_ignore_ascii_case(email))
    }

    /// 邮箱是否已被其他用户占用
    pub fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.find_by_email(email)
            .is_some_and(|user| Some(user.id()) != except_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.partition.users.values()
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.iter().filter_map(|id| self.teacher(id))
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter_map(|id| self.student(id))
    }

    pub fn teacher_ids(&self) -> &BTreeSet<String> {
        &self.teachers
    }

    pub fn student_ids(&self) -> &BTreeSet<String> {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.partition.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partition.users.is_empty()
    }
}
