use serde::Deserialize;

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub code: String,
    pub department: String,
    pub credit_hours: u32,
    pub semester: String,
    pub instructor_id: String,
}
