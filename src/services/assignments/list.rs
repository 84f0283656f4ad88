use chrono::{DateTime, Utc};

use super::AssignmentService;
use crate::errors::{Result, TrackerError};
use crate::models::assignments::{entities::Assignment, responses::AssignmentStatistics};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::services::lock;

fn filter_assignments<F>(service: &AssignmentService, predicate: F) -> Vec<Assignment>
where
    F: Fn(&Assignment) -> bool,
{
    lock(&service.assignments)
        .assignments
        .values()
        .filter(|assignment| predicate(assignment))
        .cloned()
        .collect()
}

fn filter_submissions<F>(service: &AssignmentService, predicate: F) -> Vec<Submission>
where
    F: Fn(&Submission) -> bool,
{
    lock(&service.assignments)
        .submissions
        .values()
        .filter(|submission| predicate(submission))
        .cloned()
        .collect()
}

pub fn list_assignments(service: &AssignmentService) -> Vec<Assignment> {
    filter_assignments(service, |_| true)
}

pub fn list_submissions(service: &AssignmentService) -> Vec<Submission> {
    filter_submissions(service, |_| true)
}

pub fn assignments_by_course(service: &AssignmentService, course_id: &str) -> Vec<Assignment> {
    filter_assignments(service, |assignment| assignment.course_id == course_id)
}

pub fn assignments_by_teacher(service: &AssignmentService, teacher_id: &str) -> Vec<Assignment> {
    filter_assignments(service, |assignment| assignment.creator_id == teacher_id)
}

pub fn submissions_for_assignment(service: &AssignmentService, assignment_id: &str) -> Vec<Submission> {
    filter_submissions(service, |submission| submission.assignment_id == assignment_id)
}

pub fn submissions_by_student(service: &AssignmentService, student_id: &str) -> Vec<Submission> {
    filter_submissions(service, |submission| submission.student_id == student_id)
}

pub fn overdue_assignments(service: &AssignmentService, now: DateTime<Utc>) -> Vec<Assignment> {
    filter_assignments(service, |assignment| assignment.is_overdue(now))
}

/// 作业统计；学生总数取课程的内存选课列表
pub fn assignment_statistics(
    service: &AssignmentService,
    assignment_id: &str,
) -> Result<AssignmentStatistics> {
    let courses = lock(&service.courses);
    let assignments = lock(&service.assignments);

    let assignment = assignments
        .assignments
        .get(assignment_id)
        .ok_or_else(|| TrackerError::not_found(format!("Assignment {assignment_id} not found")))?;

    let total_students = courses
        .courses
        .get(&assignment.course_id)
        .map_or(0, |course| course.enrolled_students.len());
    let (submitted, graded) = assignments
        .submissions
        .values()
        .filter(|submission| submission.assignment_id == assignment_id)
        .fold((0, 0), |(submitted, graded), submission| {
            let is_graded = submission.status == SubmissionStatus::Graded;
            (submitted + 1, graded + usize::from(is_graded))
        });

    Ok(AssignmentStatistics {
        assignment_id: assignment.id.clone(),
        title: assignment.title.clone(),
        total_students,
        submitted,
        graded,
        submission_rate: (total_students > 0)
            .then(|| submitted as f64 * 100.0 / total_students as f64),
    })
}
