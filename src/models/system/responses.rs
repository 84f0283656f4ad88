use serde::Serialize;

use crate::models::users::responses::UserStatistics;

/// 系统总体统计
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStatistics {
    pub system_name: String,
    pub users: UserStatistics,
    pub courses: usize,
    pub active_courses: usize,
    pub assignments: usize,
    pub submissions: usize,
    pub graded_submissions: usize,
}

impl std::fmt::Display for TrackerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.system_name)?;
        writeln!(
            f,
            "  users:       {} ({} teachers, {} students, {} active)",
            self.users.total, self.users.teachers, self.users.students, self.users.active
        )?;
        writeln!(
            f,
            "  courses:     {} ({} active)",
            self.courses, self.active_courses
        )?;
        writeln!(f, "  assignments: {}", self.assignments)?;
        write!(
            f,
            "  submissions: {} ({} graded)",
            self.submissions, self.graded_submissions
        )
    }
}
