pub mod auth;
pub mod delete;
pub mod list;
pub mod profile;
pub mod register;

use std::sync::Arc;

use tracing::{info, warn};

use super::{Shared, UserStore, lock, shared};
use crate::config::{EmailConfig, SecurityConfig};
use crate::errors::Result;
use crate::models::users::{
    entities::{Student, Teacher, User},
    requests::{RegisterStudentRequest, RegisterTeacherRequest, UpdateProfileRequest},
    responses::UserStatistics,
};
use crate::notify::{EmailSender, render_verification_body};
use crate::storage::PersistenceAdapter;
use crate::storage::partitions::UsersPartition;

pub struct UserService {
    users: Shared<UserStore>,
    adapter: Arc<PersistenceAdapter>,
    mailer: Arc<dyn EmailSender>,
    security: SecurityConfig,
    email: EmailConfig,
}

impl UserService {
    pub fn new(
        adapter: Arc<PersistenceAdapter>,
        mailer: Arc<dyn EmailSender>,
        security: SecurityConfig,
        email: EmailConfig,
    ) -> Result<Self> {
        let partition: UsersPartition = adapter.load()?;
        let store = UserStore::from_partition(partition);
        info!(
            "User service ready: {} teachers, {} students",
            store.teacher_ids().len(),
            store.student_ids().len()
        );
        Ok(Self {
            users: shared(store),
            adapter,
            mailer,
            security,
            email,
        })
    }

    /// 共享的用户存储句柄，供其他服务建立关系
    pub fn store(&self) -> Shared<UserStore> {
        self.users.clone()
    }

    pub(crate) fn persist(&self, store: &UserStore) -> Result<()> {
        self.adapter.save(store.partition())
    }

    // 验证邮件投递失败只记录日志
    pub(crate) fn send_verification(&self, to: &str, code: &str) {
        let body = render_verification_body(&self.email.verification_body, code);
        if let Err(e) = self
            .mailer
            .send(to, &self.email.verification_subject, &body)
        {
            warn!("Failed to send verification email to {}: {}", to, e);
        }
    }

    /// 首次运行：用户分区中还没有任何用户
    ///
    /// 设置分区丢失或损坏时不会误判，只要已有用户就不是首次运行。
    pub fn is_first_run(&self) -> bool {
        lock(&self.users).is_empty()
    }

    // 注册教师
    pub fn register_teacher(&self, req: RegisterTeacherRequest) -> Result<Teacher> {
        register::register_teacher(self, req)
    }

    // 注册学生
    pub fn register_student(&self, req: RegisterStudentRequest) -> Result<Student> {
        register::register_student(self, req)
    }

    // 登录认证
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        auth::authenticate(self, email, password)
    }

    // 邮箱验证
    pub fn verify_email(&self, email: &str, code: &str) -> Result<bool> {
        auth::verify_email(self, email, code)
    }

    // 重新发送验证码
    pub fn resend_verification_code(&self, email: &str) -> Result<bool> {
        auth::resend_verification_code(self, email)
    }

    // 更新个人资料
    pub fn update_profile(&self, user_id: &str, req: UpdateProfileRequest) -> Result<User> {
        profile::update_profile(self, user_id, req)
    }

    // 停用账号
    pub fn deactivate_user(&self, user_id: &str) -> Result<User> {
        profile::deactivate_user(self, user_id)
    }

    // 删除用户
    pub fn delete_user(&self, user_id: &str) -> Result<bool> {
        delete::delete_user(self, user_id)
    }

    pub fn delete_user_by_email(&self, email: &str) -> Result<bool> {
        delete::delete_user_by_email(self, email)
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        lock(&self.users).get(user_id).cloned()
    }

    pub fn get_teacher(&self, user_id: &str) -> Option<Teacher> {
        lock(&self.users).teacher(user_id).cloned()
    }

    pub fn get_student(&self, user_id: &str) -> Option<Student> {
        lock(&self.users).student(user_id).cloned()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        lock(&self.users).find_by_email(email).cloned()
    }

    pub fn list_teachers(&self) -> Vec<Teacher> {
        list::list_teachers(self)
    }

    pub fn list_students(&self) -> Vec<Student> {
        list::list_students(self)
    }

    pub fn teachers_by_department(&self, department: &str) -> Vec<Teacher> {
        list::teachers_by_department(self, department)
    }

    pub fn students_by_program(&self, program: &str) -> Vec<Student> {
        list::students_by_program(self, program)
    }

    pub fn statistics(&self) -> UserStatistics {
        list::statistics(self)
    }
}
