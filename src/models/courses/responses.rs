use serde::Serialize;

// 课程统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseStatistics {
    pub course_id: String,
    pub course_name: String,
    pub enrolled_students: usize,
    pub total_assignments: usize,
    // 授课教师已被删除时为 None
    pub instructor_name: Option<String>,
}
