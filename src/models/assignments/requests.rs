use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::AssignmentType;

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub creator_id: String,
    #[serde(rename = "type")]
    pub kind: AssignmentType,
    pub max_marks: u32,
    pub due_at: DateTime<Utc>,
    #[serde(default)]
    pub attachment_paths: Vec<String>,
}
