//! 登录入口
//!
//! 认证成功后按角色执行两次关系重建，再返回重建后的用户。

use std::sync::Arc;

use tracing::info;

use super::{AssignmentService, CourseService, UserService, lock};
use crate::config::AppConfig;
use crate::errors::{Result, TrackerError};
use crate::models::{
    submissions::entities::SubmissionStatus, system::responses::TrackerStatistics,
    users::entities::User,
};
use crate::notify::EmailSender;
use crate::storage::PersistenceAdapter;

pub struct AssignmentTracker {
    system_name: String,
    adapter: Arc<PersistenceAdapter>,
    users: UserService,
    courses: CourseService,
    assignments: AssignmentService,
}

impl AssignmentTracker {
    /// 按 用户 → 课程 → 作业 的顺序构建服务，后者共享前者的存储
    pub fn new(
        adapter: Arc<PersistenceAdapter>,
        mailer: Arc<dyn EmailSender>,
        config: &AppConfig,
    ) -> Result<Self> {
        let users = UserService::new(
            adapter.clone(),
            mailer,
            config.security.clone(),
            config.email.clone(),
        )?;
        let courses = CourseService::new(adapter.clone(), users.store())?;
        let assignments = AssignmentService::new(adapter.clone(), users.store(), courses.store())?;

        Ok(Self {
            system_name: config.app.system_name.clone(),
            adapter,
            users,
            courses,
            assignments,
        })
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn courses(&self) -> &CourseService {
        &self.courses
    }

    pub fn assignments(&self) -> &AssignmentService {
        &self.assignments
    }

    pub fn adapter(&self) -> &Arc<PersistenceAdapter> {
        &self.adapter
    }

    /// 登录并重建该用户的关系列表
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self.users.authenticate(email, password)?;
        self.restore_user(user.id())
    }

    /// 对指定用户执行重建，可重复调用
    pub fn restore_user(&self, user_id: &str) -> Result<User> {
        let user = self
            .users
            .get_user(user_id)
            .ok_or_else(|| TrackerError::not_found(format!("User {user_id} not found")))?;

        match &user {
            User::Teacher(teacher) => {
                self.courses.restore_teacher_courses(&teacher.account.id)?;
                self.assignments
                    .restore_teacher_assignments(&teacher.account.id)?;
            }
            User::Student(student) => {
                self.courses
                    .restore_student_enrollments(&student.account.id)?;
                self.assignments
                    .restore_student_submissions(&student.account.id)?;
            }
        }

        info!("Session restored for {}", user.display_name());
        self.users
            .get_user(user_id)
            .ok_or_else(|| TrackerError::not_found(format!("User {user_id} not found")))
    }

    pub fn statistics(&self) -> TrackerStatistics {
        let users = self.users.statistics();
        let (courses, active_courses) = {
            let store = self.courses.store();
            let store = lock(&store);
            (
                store.courses.len(),
                store.courses.values().filter(|course| course.active).count(),
            )
        };
        let (assignments, submissions, graded_submissions) = {
            let store = self.assignments.store();
            let store = lock(&store);
            (
                store.assignments.len(),
                store.submissions.len(),
                store
                    .submissions
                    .values()
                    .filter(|submission| submission.status == SubmissionStatus::Graded)
                    .count(),
            )
        };

        TrackerStatistics {
            system_name: self.system_name.clone(),
            users,
            courses,
            active_courses,
            assignments,
            submissions,
            graded_submissions,
        }
    }
}
