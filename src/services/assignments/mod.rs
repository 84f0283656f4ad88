pub mod create;
pub mod grade;
pub mod list;
pub mod restore;
pub mod submit;

use std::sync::Arc;

use tracing::{debug, info};

use super::{AssignmentStore, CourseStore, Shared, UserStore, lock, shared};
use crate::errors::Result;
use crate::models::assignments::{
    entities::Assignment, requests::CreateAssignmentRequest, responses::AssignmentStatistics,
};
use crate::models::submissions::{
    entities::Submission,
    requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
};
use crate::storage::PersistenceAdapter;

pub struct AssignmentService {
    users: Shared<UserStore>,
    courses: Shared<CourseStore>,
    assignments: Shared<AssignmentStore>,
    adapter: Arc<PersistenceAdapter>,
}

impl AssignmentService {
    /// 加载作业分区，并在内存中接回同分区的提交列表与课程的作业列表
    pub fn new(
        adapter: Arc<PersistenceAdapter>,
        users: Shared<UserStore>,
        courses: Shared<CourseStore>,
    ) -> Result<Self> {
        let mut store: AssignmentStore = adapter.load()?;
        relink(&mut store, &mut lock(&courses));
        info!(
            "Assignment service ready: {} assignments, {} submissions",
            store.assignments.len(),
            store.submissions.len()
        );
        Ok(Self {
            users,
            courses,
            assignments: shared(store),
            adapter,
        })
    }

    pub fn store(&self) -> Shared<AssignmentStore> {
        self.assignments.clone()
    }

    pub(crate) fn persist(&self, assignments: &AssignmentStore) -> Result<()> {
        self.adapter.save(assignments)
    }

    pub(crate) fn persist_with_users(
        &self,
        users: &UserStore,
        assignments: &AssignmentStore,
    ) -> Result<()> {
        let assignments_written = self.adapter.save(assignments);
        let users_written = self.adapter.save(users.partition());
        assignments_written.and(users_written)
    }

    // 创建作业
    pub fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        create::create_assignment(self, req)
    }

    // 追加作业附件
    pub fn add_assignment_attachment(&self, assignment_id: &str, path: &str) -> Result<Assignment> {
        create::add_assignment_attachment(self, assignment_id, path)
    }

    // 关闭作业
    pub fn close_assignment(&self, assignment_id: &str) -> Result<Assignment> {
        create::close_assignment(self, assignment_id)
    }

    // 学生提交作业
    pub fn submit_assignment(&self, req: SubmitAssignmentRequest) -> Result<Submission> {
        submit::submit_assignment(self, req)
    }

    // 教师评分
    pub fn grade_submission(&self, req: GradeSubmissionRequest) -> Result<Submission> {
        grade::grade_submission(self, req)
    }

    /// 登录后恢复学生的提交记录，返回恢复的条数
    pub fn restore_student_submissions(&self, student_id: &str) -> Result<usize> {
        restore::restore_student_submissions(self, student_id)
    }

    /// 登录后恢复教师创建的作业，返回恢复的条数
    pub fn restore_teacher_assignments(&self, teacher_id: &str) -> Result<usize> {
        restore::restore_teacher_assignments(self, teacher_id)
    }

    pub fn get_assignment(&self, assignment_id: &str) -> Option<Assignment> {
        lock(&self.assignments).assignments.get(assignment_id).cloned()
    }

    pub fn get_submission(&self, submission_id: &str) -> Option<Submission> {
        lock(&self.assignments).submissions.get(submission_id).cloned()
    }

    pub fn list_assignments(&self) -> Vec<Assignment> {
        list::list_assignments(self)
    }

    pub fn list_submissions(&self) -> Vec<Submission> {
        list::list_submissions(self)
    }

    pub fn assignments_by_course(&self, course_id: &str) -> Vec<Assignment> {
        list::assignments_by_course(self, course_id)
    }

    pub fn assignments_by_teacher(&self, teacher_id: &str) -> Vec<Assignment> {
        list::assignments_by_teacher(self, teacher_id)
    }

    pub fn submissions_for_assignment(&self, assignment_id: &str) -> Vec<Submission> {
        list::submissions_for_assignment(self, assignment_id)
    }

    pub fn submissions_by_student(&self, student_id: &str) -> Vec<Submission> {
        list::submissions_by_student(self, student_id)
    }

    pub fn overdue_assignments(&self) -> Vec<Assignment> {
        list::overdue_assignments(self, chrono::Utc::now())
    }

    pub fn assignment_statistics(&self, assignment_id: &str) -> Result<AssignmentStatistics> {
        list::assignment_statistics(self, assignment_id)
    }
}

/// 只在内存中重建 `Assignment::submissions` 与 `Course::assignments`
fn relink(store: &mut AssignmentStore, courses: &mut CourseStore) {
    for submission in store.submissions.values() {
        match store.assignments.get_mut(&submission.assignment_id) {
            Some(assignment) => {
                assignment.add_submission(&submission.id);
            }
            None => debug!(
                "Submission {} references missing assignment {}",
                submission.id, submission.assignment_id
            ),
        }
    }
    for assignment in store.assignments.values() {
        match courses.courses.get_mut(&assignment.course_id) {
            Some(course) => {
                course.add_assignment(&assignment.id);
            }
            None => debug!(
                "Assignment {} references missing course {}",
                assignment.id, assignment.course_id
            ),
        }
    }
}
