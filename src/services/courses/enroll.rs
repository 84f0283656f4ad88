use tracing::info;

use super::CourseService;
use crate::errors::{Result, TrackerError};
use crate::models::courses::entities::Course;
use crate::services::lock;

/// 学生选课，两侧关系同时更新；重复选课不产生重复记录
pub fn enroll_student(service: &CourseService, course_id: &str, student_id: &str) -> Result<Course> {
    let mut users = lock(&service.users);
    let mut courses = lock(&service.courses);

    let Some(course) = courses.courses.get_mut(course_id) else {
        return Err(TrackerError::not_found(format!("Course {course_id} not found")));
    };
    let Some(student) = users.student_mut(student_id) else {
        return Err(TrackerError::not_found(format!("Student {student_id} not found")));
    };

    course.enroll_student(student_id);
    student.enroll_in_course(course_id);
    let enrolled = course.clone();

    info!("Student {} enrolled in {}", student_id, enrolled.name);
    service.persist(&users, &courses)?;
    Ok(enrolled)
}
