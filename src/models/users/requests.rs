use serde::Deserialize;

// 教师注册请求
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub employee_id: String,
}

// 学生注册请求
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_id: String,
    pub program: String,
    pub semester: u32,
}

// 用户资料更新请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}
