use tracing::info;

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::submissions::{entities::Submission, requests::GradeSubmissionRequest};
use crate::services::lock;

/// 评分；分数超过作业满分时拒绝，提交记录保持不变
pub fn grade_submission(
    service: &AssignmentService,
    req: GradeSubmissionRequest,
) -> Result<Submission> {
    let users = lock(&service.users);
    let mut assignments = lock(&service.assignments);

    let Some(submission) = assignments.submissions.get(&req.submission_id) else {
        return Err(TrackerError::not_found(format!(
            "Submission {} not found",
            req.submission_id
        )));
    };
    let Some(assignment) = assignments.assignments.get(&submission.assignment_id) else {
        return Err(TrackerError::not_found(format!(
            "Assignment {} not found",
            submission.assignment_id
        )));
    };
    if users.teacher(&req.teacher_id).is_none() {
        return Err(TrackerError::not_found(format!(
            "Teacher {} not found",
            req.teacher_id
        )));
    }
    if req.marks > assignment.max_marks {
        return Err(TrackerError::validation(format!(
            "Marks cannot exceed maximum marks ({})",
            assignment.max_marks
        )));
    }

    let Some(submission) = assignments.submissions.get_mut(&req.submission_id) else {
        return Err(TrackerError::not_found(format!(
            "Submission {} not found",
            req.submission_id
        )));
    };
    submission.grade(req.marks, req.feedback, &req.teacher_id);
    let graded = submission.clone();

    info!(
        "Submission {} graded {} by {}",
        graded.id, req.marks, req.teacher_id
    );
    service.persist(&assignments)?;
    Ok(graded)
}
