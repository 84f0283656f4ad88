use super::CourseService;
use crate::errors::{Result, TrackerError};
use crate::models::courses::{entities::Course, responses::CourseStatistics};
use crate::services::lock;

fn filter_courses<F>(service: &CourseService, predicate: F) -> Vec<Course>
where
    F: Fn(&Course) -> bool,
{
    lock(&service.courses)
        .courses
        .values()
        .filter(|course| predicate(course))
        .cloned()
        .collect()
}

pub fn list_courses(service: &CourseService) -> Vec<Course> {
    filter_courses(service, |_| true)
}

pub fn courses_by_department(service: &CourseService, department: &str) -> Vec<Course> {
    let department = department.trim();
    filter_courses(service, |course| course.department.eq_ignore_ascii_case(department))
}

pub fn courses_by_semester(service: &CourseService, semester: &str) -> Vec<Course> {
    let semester = semester.trim();
    filter_courses(service, |course| course.semester.eq_ignore_ascii_case(semester))
}

pub fn courses_by_teacher(service: &CourseService, teacher_id: &str) -> Vec<Course> {
    filter_courses(service, |course| course.instructor_id == teacher_id)
}

// 依据课程一侧的内存选课列表
pub fn courses_for_student(service: &CourseService, student_id: &str) -> Vec<Course> {
    filter_courses(service, |course| course.has_student(student_id))
}

pub fn find_course_by_code(service: &CourseService, code: &str) -> Option<Course> {
    let code = code.trim();
    lock(&service.courses)
        .courses
        .values()
        .find(|course| course.code.eq_ignore_ascii_case(code))
        .cloned()
}

pub fn course_statistics(service: &CourseService, course_id: &str) -> Result<CourseStatistics> {
    let users = lock(&service.users);
    let courses = lock(&service.courses);
    let course = courses
        .courses
        .get(course_id)
        .ok_or_else(|| TrackerError::not_found(format!("Course {course_id} not found")))?;

    Ok(CourseStatistics {
        course_id: course.id.clone(),
        course_name: course.name.clone(),
        enrolled_students: course.enrolled_students.len(),
        total_assignments: course.assignments.len(),
        instructor_name: users
            .teacher(&course.instructor_id)
            .map(|teacher| teacher.account.name.clone()),
    })
}
