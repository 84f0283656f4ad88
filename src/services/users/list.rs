use super::UserService;
use crate::models::users::{
    entities::{Student, Teacher},
    responses::UserStatistics,
};
use crate::services::lock;

pub fn list_teachers(service: &UserService) -> Vec<Teacher> {
    lock(&service.users).teachers().cloned().collect()
}

pub fn list_students(service: &UserService) -> Vec<Student> {
    lock(&service.users).students().cloned().collect()
}

// 院系匹配忽略大小写
pub fn teachers_by_department(service: &UserService, department: &str) -> Vec<Teacher> {
    lock(&service.users)
        .teachers()
        .filter(|teacher| teacher.department.eq_ignore_ascii_case(department.trim()))
        .cloned()
        .collect()
}

pub fn students_by_program(service: &UserService, program: &str) -> Vec<Student> {
    lock(&service.users)
        .students()
        .filter(|student| student.program.eq_ignore_ascii_case(program.trim()))
        .cloned()
        .collect()
}

pub fn statistics(service: &UserService) -> UserStatistics {
    let users = lock(&service.users);
    UserStatistics {
        total: users.len(),
        teachers: users.teacher_ids().len(),
        students: users.student_ids().len(),
        active: users.users().filter(|user| user.account().active).count(),
    }
}
