use serde::Deserialize;

// 提交作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub assignment_id: String,
    pub student_id: String,
    pub content: String,
    #[serde(default)]
    pub attachment_paths: Vec<String>,
}

// 评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmissionRequest {
    pub submission_id: String,
    pub marks: u32,
    pub feedback: Option<String>,
    pub teacher_id: String,
}
