use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;
use crate::utils::push_unique;

// 提交状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    #[default]
    Submitted,
    UnderReview,
    Graded,
    Returned,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Draft => write!(f, "Draft"),
            SubmissionStatus::Submitted => write!(f, "Submitted"),
            SubmissionStatus::UnderReview => write!(f, "Under Review"),
            SubmissionStatus::Graded => write!(f, "Graded"),
            SubmissionStatus::Returned => write!(f, "Returned for Revision"),
        }
    }
}

/// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub content: String,
    #[serde(default)]
    pub attachment_paths: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: SubmissionStatus,
    pub marks: Option<u32>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    // 评分教师 ID
    pub graded_by: Option<String>,
}

impl Submission {
    pub fn new(id: String, assignment_id: String, student_id: String, content: String) -> Self {
        Self {
            id,
            assignment_id,
            student_id,
            content,
            attachment_paths: Vec::new(),
            submitted_at: Utc::now(),
            status: SubmissionStatus::Submitted,
            marks: None,
            feedback: None,
            graded_at: None,
            graded_by: None,
        }
    }

    pub fn add_attachment(&mut self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }
        push_unique(&mut self.attachment_paths, path)
    }

    /// 评分；重复评分直接覆盖，不保留历史。分数范围由调用方校验。
    pub fn grade(&mut self, marks: u32, feedback: Option<String>, teacher_id: &str) {
        self.marks = Some(marks);
        self.feedback = feedback;
        self.graded_by = Some(teacher_id.to_string());
        self.graded_at = Some(Utc::now());
        self.status = SubmissionStatus::Graded;
    }

    pub fn is_late(&self, assignment: &Assignment) -> bool {
        self.submitted_at > assignment.due_at
    }
}

// 提交相等性只看 ID
impl PartialEq for Submission {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Submission {}

impl std::hash::Hash for Submission {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
