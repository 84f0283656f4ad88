use tracing::{debug, info};

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::services::lock;

pub fn restore_student_submissions(service: &AssignmentService, student_id: &str) -> Result<usize> {
    let mut users = lock(&service.users);
    let assignments = lock(&service.assignments);

    let Some(student) = users.student_mut(student_id) else {
        return Err(TrackerError::not_found(format!("Student {student_id} not found")));
    };

    student.clear_submissions();
    for submission_id in student.submission_ids.clone() {
        if !assignments.submissions.contains_key(&submission_id) {
            debug!(
                "Skipping stale submission id {} for student {}",
                submission_id, student_id
            );
            continue;
        }
        student.attach_submission(&submission_id);
    }

    let restored = student.submissions.len();
    info!("Restored {} submissions for student {}", restored, student_id);
    Ok(restored)
}

/// 恢复教师创建的作业；作业记录的创建者与该教师不一致时以该教师为准
pub fn restore_teacher_assignments(service: &AssignmentService, teacher_id: &str) -> Result<usize> {
    let mut users = lock(&service.users);
    let mut assignments = lock(&service.assignments);

    let Some(teacher) = users.teacher_mut(teacher_id) else {
        return Err(TrackerError::not_found(format!("Teacher {teacher_id} not found")));
    };

    teacher.clear_assignments_created();
    for assignment_id in teacher.assignment_ids.clone() {
        let Some(assignment) = assignments.assignments.get_mut(&assignment_id) else {
            debug!(
                "Skipping stale assignment id {} for teacher {}",
                assignment_id, teacher_id
            );
            continue;
        };
        if assignment.creator_id != teacher_id {
            debug!(
                "Assignment {} creator {} replaced by {}",
                assignment_id, assignment.creator_id, teacher_id
            );
            assignment.creator_id = teacher_id.to_string();
        }
        teacher.attach_assignment(&assignment_id);
    }

    let restored = teacher.assignments_created.len();
    info!("Restored {} assignments for teacher {}", restored, teacher_id);
    Ok(restored)
}
