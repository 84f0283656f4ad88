use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::push_unique;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[serde(alias = "TEACHER", alias = "Teacher")]
    Teacher, // 教师
    #[serde(alias = "STUDENT", alias = "Student")]
    Student, // 学生
}

impl UserRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    /// 该角色的 ID 前缀
    pub fn id_prefix(&self) -> &'static str {
        match self {
            UserRole::Teacher => crate::storage::id_allocator::TEACHER_PREFIX,
            UserRole::Student => crate::storage::id_allocator::STUDENT_PREFIX,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    // 忽略大小写，与反序列化时接受的写法一致
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户公共字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub email_verification_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl UserAccount {
    pub fn new(id: String, name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            active: true,
            email_verified: false,
            email_verification_code: None,
            created_at: Utc::now(),
        }
    }
}

/// 教师
///
/// `courses_taught` / `assignments_created` 只存在于内存中，
/// 由 `course_ids` / `assignment_ids` 在登录时重建。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(flatten)]
    pub account: UserAccount,
    pub department: String,
    pub employee_id: String,
    #[serde(default)]
    pub course_ids: Vec<String>,
    #[serde(default)]
    pub assignment_ids: Vec<String>,
    #[serde(skip)]
    pub courses_taught: Vec<String>,
    #[serde(skip)]
    pub assignments_created: Vec<String>,
}

impl Teacher {
    pub fn new(account: UserAccount, department: String, employee_id: String) -> Self {
        Self {
            account,
            department,
            employee_id,
            course_ids: Vec::new(),
            assignment_ids: Vec::new(),
            courses_taught: Vec::new(),
            assignments_created: Vec::new(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("Prof. {} ({})", self.account.name, self.department)
    }

    /// 登记授课课程（内存列表与持久化 ID 列表同时更新）
    pub fn add_course(&mut self, course_id: &str) {
        push_unique(&mut self.courses_taught, course_id);
        push_unique(&mut self.course_ids, course_id);
    }

    /// 登记创建的作业
    pub fn add_assignment(&mut self, assignment_id: &str) {
        push_unique(&mut self.assignments_created, assignment_id);
        push_unique(&mut self.assignment_ids, assignment_id);
    }

    pub fn clear_courses_taught(&mut self) {
        self.courses_taught.clear();
    }

    /// 只恢复内存列表，不改动 ID 列表
    pub fn attach_course(&mut self, course_id: &str) {
        push_unique(&mut self.courses_taught, course_id);
    }

    pub fn clear_assignments_created(&mut self) {
        self.assignments_created.clear();
    }

    pub fn attach_assignment(&mut self, assignment_id: &str) {
        push_unique(&mut self.assignments_created, assignment_id);
    }
}

/// 学生
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    pub account: UserAccount,
    pub student_id: String,
    pub program: String,
    pub semester: u32,
    #[serde(default)]
    pub enrolled_course_ids: Vec<String>,
    #[serde(default)]
    pub submission_ids: Vec<String>,
    #[serde(skip)]
    pub enrolled_courses: Vec<String>,
    #[serde(skip)]
    pub submissions: Vec<String>,
}

impl Student {
    pub fn new(account: UserAccount, student_id: String, program: String, semester: u32) -> Self {
        Self {
            account,
            student_id,
            program,
            semester,
            enrolled_course_ids: Vec::new(),
            submission_ids: Vec::new(),
            enrolled_courses: Vec::new(),
            submissions: Vec::new(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.account.name, self.student_id)
    }

    pub fn enroll_in_course(&mut self, course_id: &str) {
        push_unique(&mut self.enrolled_courses, course_id);
        push_unique(&mut self.enrolled_course_ids, course_id);
    }

    pub fn add_submission(&mut self, submission_id: &str) {
        push_unique(&mut self.submissions, submission_id);
        push_unique(&mut self.submission_ids, submission_id);
    }

    pub fn clear_enrolled_courses(&mut self) {
        self.enrolled_courses.clear();
    }

    pub fn attach_course(&mut self, course_id: &str) {
        push_unique(&mut self.enrolled_courses, course_id);
    }

    pub fn clear_submissions(&mut self) {
        self.submissions.clear();
    }

    pub fn attach_submission(&mut self, submission_id: &str) {
        push_unique(&mut self.submissions, submission_id);
    }
}

/// 用户实体：教师或学生
///
/// 序列化时以 `role` 字段区分子类型，读取时兼容旧数据中的大写角色名。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum User {
    #[serde(alias = "TEACHER", alias = "Teacher")]
    Teacher(Teacher),
    #[serde(alias = "STUDENT", alias = "Student")]
    Student(Student),
}

impl User {
    pub fn account(&self) -> &UserAccount {
        match self {
            User::Teacher(teacher) => &teacher.account,
            User::Student(student) => &student.account,
        }
    }

    pub fn account_mut(&mut self) -> &mut UserAccount {
        match self {
            User::Teacher(teacher) => &mut teacher.account,
            User::Student(student) => &mut student.account,
        }
    }

    pub fn id(&self) -> &str {
        &self.account().id
    }

    pub fn name(&self) -> &str {
        &self.account().name
    }

    pub fn email(&self) -> &str {
        &self.account().email
    }

    pub fn role(&self) -> UserRole {
        match self {
            User::Teacher(_) => UserRole::Teacher,
            User::Student(_) => UserRole::Student,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            User::Teacher(teacher) => teacher.display_name(),
            User::Student(student) => student.display_name(),
        }
    }

    /// 通用的课程 ID 列表（教师为授课课程，学生为选修课程）
    pub fn course_ids(&self) -> &[String] {
        match self {
            User::Teacher(teacher) => &teacher.course_ids,
            User::Student(student) => &student.enrolled_course_ids,
        }
    }

    /// 通用的作业 ID 列表（教师为创建的作业，学生为提交记录）
    pub fn assignment_ids(&self) -> &[String] {
        match self {
            User::Teacher(teacher) => &teacher.assignment_ids,
            User::Student(student) => &student.submission_ids,
        }
    }

    pub fn as_teacher(&self) -> Option<&Teacher> {
        match self {
            User::Teacher(teacher) => Some(teacher),
            User::Student(_) => None,
        }
    }

    pub fn as_teacher_mut(&mut self) -> Option<&mut Teacher> {
        match self {
            User::Teacher(teacher) => Some(teacher),
            User::Student(_) => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            User::Student(student) => Some(student),
            User::Teacher(_) => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut Student> {
        match self {
            User::Student(student) => Some(student),
            User::Teacher(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> UserAccount {
        UserAccount::new(
            id.to_string(),
            "Mohammad Ali".to_string(),
            "ali@student.bup.edu.bd".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_student_relationship_adds_are_idempotent() {
        let mut student = Student::new(account("STD-0001"), "201901001".into(), "CSE".into(), 7);
        student.enroll_in_course("CRS-0001");
        student.enroll_in_course("CRS-0001");
        student.add_submission("SUB-0001");
        student.add_submission("SUB-0001");

        assert_eq!(student.enrolled_courses, vec!["CRS-0001"]);
        assert_eq!(student.enrolled_course_ids, vec!["CRS-0001"]);
        assert_eq!(student.submissions, vec!["SUB-0001"]);
        assert_eq!(student.submission_ids, vec!["SUB-0001"]);
    }

    #[test]
    fn test_attach_does_not_touch_id_list() {
        let mut teacher = Teacher::new(account("TCH-0001"), "CS".into(), "EMP001".into());
        teacher.attach_course("CRS-0009");
        assert_eq!(teacher.courses_taught, vec!["CRS-0009"]);
        assert!(teacher.course_ids.is_empty());
    }

    #[test]
    fn test_wire_form_is_tagged_and_skips_live_lists() {
        let mut teacher = Teacher::new(account("TCH-0001"), "CS".into(), "EMP001".into());
        teacher.add_course("CRS-0001");
        let json = serde_json::to_value(User::Teacher(teacher)).expect("serialize");

        assert_eq!(json["role"], "teacher");
        assert_eq!(json["id"], "TCH-0001");
        assert_eq!(json["course_ids"][0], "CRS-0001");
        assert!(json.get("courses_taught").is_none());

        let back: User = serde_json::from_value(json).expect("deserialize");
        let teacher = back.as_teacher().expect("teacher variant");
        assert_eq!(teacher.course_ids, vec!["CRS-0001"]);
        assert!(teacher.courses_taught.is_empty());
    }

    #[test]
    fn test_legacy_role_tags_deserialize() {
        let json = r#"{"role":"TEACHER","id":"TCH-0001","name":"Ahmed","email":"ahmed@bup.edu.bd",
            "password_hash":"h","created_at":"2024-09-01T00:00:00Z",
            "department":"CS","employee_id":"EMP001","course_ids":["CRS-0001"]}"#;
        let user: User = serde_json::from_str(json).expect("legacy teacher");
        assert_eq!(user.role(), UserRole::Teacher);
        assert_eq!(user.course_ids(), ["CRS-0001".to_string()]);

        let json = json
            .replace(r#""role":"TEACHER""#, r#""role":"Student""#)
            .replace(r#""department":"CS","employee_id":"EMP001""#, r#""student_id":"1","program":"CSE","semester":7"#);
        let user: User = serde_json::from_str(&json).expect("legacy student");
        assert_eq!(user.role(), UserRole::Student);

        let role: UserRole = serde_json::from_str(r#""STUDENT""#).expect("role");
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_role_parse_accepts_legacy_case() {
        assert_eq!("TEACHER".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!("Student".parse::<UserRole>(), Ok(UserRole::Student));
        assert!("admin".parse::<UserRole>().is_err());
    }
}
