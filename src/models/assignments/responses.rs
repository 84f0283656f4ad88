use serde::Serialize;

// 作业统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentStatistics {
    pub assignment_id: String,
    pub title: String,
    pub total_students: usize,
    pub submitted: usize,
    pub graded: usize,
    // 课程没有学生时为 None
    pub submission_rate: Option<f64>,
}
