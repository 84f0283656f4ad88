pub mod create;
pub mod enroll;
pub mod list;
pub mod restore;

use std::sync::Arc;

use tracing::info;

use super::{CourseStore, Shared, UserStore, lock, shared};
use crate::errors::Result;
use crate::models::courses::{
    entities::Course, requests::CreateCourseRequest, responses::CourseStatistics,
};
use crate::storage::PersistenceAdapter;

pub struct CourseService {
    users: Shared<UserStore>,
    courses: Shared<CourseStore>,
    adapter: Arc<PersistenceAdapter>,
}

impl CourseService {
    pub fn new(adapter: Arc<PersistenceAdapter>, users: Shared<UserStore>) -> Result<Self> {
        let store: CourseStore = adapter.load()?;
        info!("Course service ready: {} courses", store.courses.len());
        Ok(Self {
            users,
            courses: shared(store),
            adapter,
        })
    }

    pub fn store(&self) -> Shared<CourseStore> {
        self.courses.clone()
    }

    // 两个分区都尝试写入，返回第一个错误
    pub(crate) fn persist(&self, users: &UserStore, courses: &CourseStore) -> Result<()> {
        let courses_written = self.adapter.save(courses);
        let users_written = self.adapter.save(users.partition());
        courses_written.and(users_written)
    }

    // 创建课程
    pub fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        create::create_course(self, req)
    }

    // 学生选课
    pub fn enroll_student(&self, course_id: &str, student_id: &str) -> Result<Course> {
        enroll::enroll_student(self, course_id, student_id)
    }

    /// 登录后恢复学生的选课关系，返回恢复的课程数
    pub fn restore_student_enrollments(&self, student_id: &str) -> Result<usize> {
        restore::restore_student_enrollments(self, student_id)
    }

    /// 登录后恢复教师的授课关系，返回恢复的课程数
    pub fn restore_teacher_courses(&self, teacher_id: &str) -> Result<usize> {
        restore::restore_teacher_courses(self, teacher_id)
    }

    pub fn get_course(&self, course_id: &str) -> Option<Course> {
        lock(&self.courses).courses.get(course_id).cloned()
    }

    pub fn list_courses(&self) -> Vec<Course> {
        list::list_courses(self)
    }

    pub fn courses_by_department(&self, department: &str) -> Vec<Course> {
        list::courses_by_department(self, department)
    }

    pub fn courses_by_semester(&self, semester: &str) -> Vec<Course> {
        list::courses_by_semester(self, semester)
    }

    pub fn courses_by_teacher(&self, teacher_id: &str) -> Vec<Course> {
        list::courses_by_teacher(self, teacher_id)
    }

    pub fn courses_for_student(&self, student_id: &str) -> Vec<Course> {
        list::courses_for_student(self, student_id)
    }

    pub fn find_course_by_code(&self, code: &str) -> Option<Course> {
        list::find_course_by_code(self, code)
    }

    pub fn course_statistics(&self, course_id: &str) -> Result<CourseStatistics> {
        list::course_statistics(self, course_id)
    }
}
