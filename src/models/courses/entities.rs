use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::push_unique;

/// 课程
///
/// 授课教师只以 ID 持久化；`enrolled_students` 与 `assignments`
/// 不写入分区文件，由重建流程在内存中恢复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    // 课程ID
    pub id: String,
    // 课程名称
    pub name: String,
    // 课程代码，例如 CSE-202
    pub code: String,
    pub department: String,
    pub credit_hours: u32,
    // 学期，例如 Fall 2024
    pub semester: String,
    // 授课教师ID
    pub instructor_id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub enrolled_students: Vec<String>,
    #[serde(skip)]
    pub assignments: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl Course {
    pub fn new(
        id: String,
        name: String,
        code: String,
        department: String,
        credit_hours: u32,
        semester: String,
        instructor_id: String,
    ) -> Self {
        Self {
            id,
            name,
            code,
            department,
            credit_hours,
            semester,
            instructor_id,
            active: true,
            created_at: Utc::now(),
            enrolled_students: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// 课程一侧的选课登记，返回是否新增
    pub fn enroll_student(&mut self, student_id: &str) -> bool {
        push_unique(&mut self.enrolled_students, student_id)
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.enrolled_students.iter().any(|id| id == student_id)
    }

    pub fn add_assignment(&mut self, assignment_id: &str) -> bool {
        push_unique(&mut self.assignments, assignment_id)
    }
}

// 课程相等性只看 ID
impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl std::hash::Hash for Course {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
