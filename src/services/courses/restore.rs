//! 登录时的关系重建
//!
//! 先清空用户的内存列表，再按持久化的 ID 列表逐个查找并挂回。
//! 找不到的 ID 直接跳过。重建结果不写回分区。

use tracing::{debug, info};

use super::CourseService;
use crate::errors::{Result, TrackerError};
use crate::services::lock;

pub fn restore_student_enrollments(service: &CourseService, student_id: &str) -> Result<usize> {
    let mut users = lock(&service.users);
    let mut courses = lock(&service.courses);

    let Some(student) = users.student_mut(student_id) else {
        return Err(TrackerError::not_found(format!("Student {student_id} not found")));
    };

    student.clear_enrolled_courses();
    for course_id in student.enrolled_course_ids.clone() {
        let Some(course) = courses.courses.get_mut(&course_id) else {
            debug!("Skipping stale course id {} for student {}", course_id, student_id);
            continue;
        };
        course.enroll_student(student_id);
        student.attach_course(&course_id);
    }

    let restored = student.enrolled_courses.len();
    info!("Restored {} courses for student {}", restored, student_id);
    Ok(restored)
}

pub fn restore_teacher_courses(service: &CourseService, teacher_id: &str) -> Result<usize> {
    let mut users = lock(&service.users);
    let mut courses = lock(&service.courses);

    let Some(teacher) = users.teacher_mut(teacher_id) else {
        return Err(TrackerError::not_found(format!("Teacher {teacher_id} not found")));
    };

    teacher.clear_courses_taught();
    for course_id in teacher.course_ids.clone() {
        let Some(course) = courses.courses.get_mut(&course_id) else {
            debug!("Skipping stale course id {} for teacher {}", course_id, teacher_id);
            continue;
        };
        if course.instructor_id != teacher_id {
            debug!(
                "Course {} instructor {} replaced by {}",
                course_id, course.instructor_id, teacher_id
            );
            course.instructor_id = teacher_id.to_string();
        }
        teacher.attach_course(&course_id);
    }

    let restored = teacher.courses_taught.len();
    info!("Restored {} courses for teacher {}", restored, teacher_id);
    Ok(restored)
}
