use serde::Serialize;

// 用户统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStatistics {
    pub total: usize,
    pub teachers: usize,
    pub students: usize,
    pub active: usize,
}
