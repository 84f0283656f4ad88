use tracing::{info, warn};

use super::CourseService;
use crate::errors::{Result, TrackerError};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use crate::services::lock;
use crate::storage::id_allocator::COURSE_PREFIX;
use crate::utils::validate::validate_required;

fn validate_request(req: &CreateCourseRequest) -> Result<()> {
    validate_required("Course name", &req.name).map_err(TrackerError::validation)?;
    validate_required("Course code", &req.code).map_err(TrackerError::validation)?;
    if req.credit_hours == 0 {
        return Err(TrackerError::validation("Credit hours must be positive"));
    }
    Ok(())
}

pub fn create_course(service: &CourseService, req: CreateCourseRequest) -> Result<Course> {
    validate_request(&req)?;

    let mut users = lock(&service.users);
    let mut courses = lock(&service.courses);

    let code = req.code.trim();
    // 课程代码唯一性只在创建时检查
    if courses
        .courses
        .values()
        .any(|course| course.code.eq_ignore_ascii_case(code))
    {
        return Err(TrackerError::validation(format!(
            "Course code {code} already exists"
        )));
    }

    let Some(teacher) = users.teacher_mut(&req.instructor_id) else {
        return Err(TrackerError::not_found(format!(
            "Teacher {} not found",
            req.instructor_id
        )));
    };

    let id = courses.counter.allocate(COURSE_PREFIX);
    if courses.courses.contains_key(&id) {
        warn!("Allocated course id {} already exists, counter is stale", id);
    }
    let course = Course::new(
        id.clone(),
        req.name.trim().to_string(),
        code.to_string(),
        req.department.trim().to_string(),
        req.credit_hours,
        req.semester.trim().to_string(),
        teacher.account.id.clone(),
    );
    teacher.add_course(&id);
    courses.courses.insert(id.clone(), course.clone());

    info!("Course created: {} [{}] by {}", course.name, id, course.instructor_id);
    service.persist(&users, &courses)?;
    Ok(course)
}
