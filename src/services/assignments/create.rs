use chrono::Utc;
use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::CreateAssignmentRequest,
};
use crate::services::lock;
use crate::storage::id_allocator::ASSIGNMENT_PREFIX;
use crate::utils::validate::validate_required;

pub fn create_assignment(
    service: &AssignmentService,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    validate_required("Title", &req.title).map_err(TrackerError::validation)?;
    if req.max_marks == 0 {
        return Err(TrackerError::validation("Max marks must be positive"));
    }

    let mut users = lock(&service.users);
    let mut courses = lock(&service.courses);
    let mut assignments = lock(&service.assignments);

    let Some(course) = courses.courses.get_mut(&req.course_id) else {
        return Err(TrackerError::not_found(format!(
            "Course {} not found",
            req.course_id
        )));
    };
    let Some(teacher) = users.teacher_mut(&req.creator_id) else {
        return Err(TrackerError::not_found(format!(
            "Teacher {} not found",
            req.creator_id
        )));
    };

    let id = assignments.assignment_counter.allocate(ASSIGNMENT_PREFIX);
    if assignments.assignments.contains_key(&id) {
        warn!("Allocated assignment id {} already exists, counter is stale", id);
    }
    let mut assignment = Assignment {
        id: id.clone(),
        title: req.title.trim().to_string(),
        description: req.description,
        course_id: course.id.clone(),
        creator_id: teacher.account.id.clone(),
        kind: req.kind,
        status: AssignmentStatus::Active,
        created_at: Utc::now(),
        due_at: req.due_at,
        max_marks: req.max_marks,
        submissions: Vec::new(),
        attachment_paths: Vec::new(),
    };
    for path in &req.attachment_paths {
        assignment.add_attachment_path(path);
    }

    course.add_assignment(&id);
    teacher.add_assignment(&id);
    assignments.assignments.insert(id.clone(), assignment.clone());

    info!(
        "Assignment created: {} [{}] in {}",
        assignment.title, id, assignment.course_id
    );
    service.persist_with_users(&users, &assignments)?;
    Ok(assignment)
}

pub fn add_assignment_attachment(
    service: &AssignmentService,
    assignment_id: &str,
    path: &str,
) -> Result<Assignment> {
    validate_required("Attachment path", path).map_err(TrackerError::validation)?;

    let mut assignments = lock(&service.assignments);
    let Some(assignment) = assignments.assignments.get_mut(assignment_id) else {
        return Err(TrackerError::not_found(format!(
            "Assignment {assignment_id} not found"
        )));
    };
    if !assignment.add_attachment_path(path) {
        return Ok(assignment.clone());
    }
    let updated = assignment.clone();

    service.persist(&assignments)?;
    Ok(updated)
}

/// 关闭作业：只允许 Active → Closed，已关闭的作业重复关闭不报错
pub fn close_assignment(service: &AssignmentService, assignment_id: &str) -> Result<Assignment> {
    let mut assignments = lock(&service.assignments);
    let Some(assignment) = assignments.assignments.get_mut(assignment_id) else {
        return Err(TrackerError::not_found(format!(
            "Assignment {assignment_id} not found"
        )));
    };

    match assignment.status {
        AssignmentStatus::Active => assignment.status = AssignmentStatus::Closed,
        AssignmentStatus::Closed => return Ok(assignment.clone()),
        other => {
            return Err(TrackerError::state(format!(
                "Assignment {assignment_id} is {other} and cannot be closed"
            )));
        }
    }
    let updated = assignment.clone();

    info!("Assignment closed: {}", updated.title);
    service.persist(&assignments)?;
    Ok(updated)
}
