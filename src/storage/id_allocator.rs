//! ID 分配器
//!
//! 每种实体一个单调递增计数器，生成形如 `PREFIX-NNNN` 的 ID。
//! 已分配的 ID 不回收，也不填补空洞。

use serde::{Deserialize, Serialize};

pub const TEACHER_PREFIX: &str = "TCH";
pub const STUDENT_PREFIX: &str = "STD";
pub const COURSE_PREFIX: &str = "CRS";
pub const ASSIGNMENT_PREFIX: &str = "ASSIGN";
pub const SUBMISSION_PREFIX: &str = "SUB";

/// 计数器，保存下一个待分配的序号（从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdAllocator(u32);

impl Default for IdAllocator {
    fn default() -> Self {
        Self(1)
    }
}

impl IdAllocator {
    pub fn new(next: u32) -> Self {
        Self(next.max(1))
    }

    /// 下一个将被分配的序号
    pub fn peek(&self) -> u32 {
        self.0
    }

    pub fn allocate(&mut self, prefix: &str) -> String {
        let id = format_id(prefix, self.0);
        self.0 = self.0.saturating_add(1);
        id
    }

    /// 将计数器抬高到已有 ID 最大序号之后，返回是否发生调整
    ///
    /// 计数器只会变大，不会因为 ID 被删除而回退。
    pub fn reconcile<'a, I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let floor = ids
            .into_iter()
            .filter_map(parse_sequence)
            .max()
            .map(|max| max.saturating_add(1))
            .unwrap_or(1);
        if floor > self.0 {
            self.0 = floor;
            true
        } else {
            false
        }
    }
}

pub fn format_id(prefix: &str, sequence: u32) -> String {
    format!("{prefix}-{sequence:04}")
}

/// 解析 ID 中的序号部分，格式不符时返回 None
pub fn parse_sequence(id: &str) -> Option<u32> {
    let (prefix, digits) = id.rsplit_once('-')?;
    if prefix.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
