use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::submissions::{entities::Submission, requests::SubmitAssignmentRequest};
use crate::services::lock;
use crate::storage::id_allocator::SUBMISSION_PREFIX;

/// 提交作业，作业必须处于 Active 状态
pub fn submit_assignment(
    service: &AssignmentService,
    req: SubmitAssignmentRequest,
) -> Result<Submission> {
    let mut users = lock(&service.users);
    let mut assignments = lock(&service.assignments);

    let Some(assignment) = assignments.assignments.get(&req.assignment_id) else {
        return Err(TrackerError::not_found(format!(
            "Assignment {} not found",
            req.assignment_id
        )));
    };
    if !assignment.accepts_submissions() {
        return Err(TrackerError::state(format!(
            "Assignment {} is {} and does not accept submissions",
            assignment.id, assignment.status
        )));
    }
    let Some(student) = users.student_mut(&req.student_id) else {
        return Err(TrackerError::not_found(format!(
            "Student {} not found",
            req.student_id
        )));
    };

    let id = assignments.submission_counter.allocate(SUBMISSION_PREFIX);
    if assignments.submissions.contains_key(&id) {
        warn!("Allocated submission id {} already exists, counter is stale", id);
    }
    let mut submission = Submission::new(
        id.clone(),
        req.assignment_id.clone(),
        req.student_id.clone(),
        req.content,
    );
    for path in &req.attachment_paths {
        submission.add_attachment(path);
    }

    if let Some(assignment) = assignments.assignments.get_mut(&req.assignment_id) {
        assignment.add_submission(&id);
    }
    student.add_submission(&id);
    assignments.submissions.insert(id.clone(), submission.clone());

    info!(
        "Assignment {} submitted by {} as {}",
        req.assignment_id, req.student_id, id
    );
    service.persist_with_users(&users, &assignments)?;
    Ok(submission)
}
