use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::push_unique;

// 作业类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    Homework,
    Project,
    Lab,
    Quiz,
    Exam,
    Presentation,
    Research,
    CaseStudy,
}

impl AssignmentType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AssignmentType::Homework => "Homework",
            AssignmentType::Project => "Project",
            AssignmentType::Lab => "Lab Assignment",
            AssignmentType::Quiz => "Quiz",
            AssignmentType::Exam => "Exam",
            AssignmentType::Presentation => "Presentation",
            AssignmentType::Research => "Research Paper",
            AssignmentType::CaseStudy => "Case Study",
        }
    }
}

impl std::fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// 作业状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,
    #[default]
    Active,
    Closed,
    Graded,
    Archived,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "Draft"),
            AssignmentStatus::Active => write!(f, "Active"),
            AssignmentStatus::Closed => write!(f, "Closed"),
            AssignmentStatus::Graded => write!(f, "Graded"),
            AssignmentStatus::Archived => write!(f, "Archived"),
        }
    }
}

/// 作业
///
/// 课程与创建者只以 ID 持久化，`submissions` 由同一分区中的提交记录恢复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: String,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 关联的课程 ID
    pub course_id: String,
    // 创建者 ID
    pub creator_id: String,
    #[serde(rename = "type")]
    pub kind: AssignmentType,
    #[serde(default)]
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    // 作业最高分数
    pub max_marks: u32,
    #[serde(skip)]
    pub submissions: Vec<String>,
    // 作业附件路径
    #[serde(default)]
    pub attachment_paths: Vec<String>,
}

impl Assignment {
    /// 是否接受新的提交
    pub fn accepts_submissions(&self) -> bool {
        self.status == AssignmentStatus::Active
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_at
    }

    pub fn add_submission(&mut self, submission_id: &str) -> bool {
        push_unique(&mut self.submissions, submission_id)
    }

    /// 追加附件路径（空路径与重复路径被忽略）
    pub fn add_attachment_path(&mut self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }
        push_unique(&mut self.attachment_paths, path)
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Assignment {}
