mod common;

use common::*;
use rust_assignment_tracker::models::assignments::entities::AssignmentStatus;
use rust_assignment_tracker::models::submissions::{
    entities::SubmissionStatus,
    requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
};

fn submit(assignment_id: &str, student_id: &str, content: &str) -> SubmitAssignmentRequest {
    SubmitAssignmentRequest {
        assignment_id: assignment_id.to_string(),
        student_id: student_id.to_string(),
        content: content.to_string(),
        attachment_paths: Vec::new(),
    }
}

fn grade(submission_id: &str, teacher_id: &str, marks: u32) -> GradeSubmissionRequest {
    GradeSubmissionRequest {
        submission_id: submission_id.to_string(),
        marks,
        feedback: Some("Well done".to_string()),
        teacher_id: teacher_id.to_string(),
    }
}

#[test]
fn test_submit_and_grade_flow() {
    let harness = Harness::new();
    let tracker = harness.tracker();

    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let hw1 = create_assignment(&tracker, "HW1", &course.id, &t1.account.id);
    assert_eq!(hw1.status, AssignmentStatus::Active);
    assert_eq!(hw1.max_marks, 100);

    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");
    tracker
        .courses()
        .enroll_student(&course.id, &s1.account.id)
        .expect("enroll");

    let submission = tracker
        .assignments()
        .submit_assignment(submit(&hw1.id, &s1.account.id, "answer"))
        .expect("submit");
    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert_eq!(submission.content, "answer");

    let graded = tracker
        .assignments()
        .grade_submission(grade(&submission.id, &t1.account.id, 85))
        .expect("grade");
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.marks, Some(85));
    assert_eq!(graded.graded_by.as_deref(), Some(t1.account.id.as_str()));
    assert!(graded.graded_at.is_some());

    let err = tracker
        .assignments()
        .grade_submission(grade(&submission.id, &t1.account.id, 150))
        .expect_err("marks above max");
    assert_eq!(err.code(), "E002");

    let stored = tracker
        .assignments()
        .get_submission(&submission.id)
        .expect("submission");
    assert_eq!(stored.marks, Some(85));
    assert_eq!(stored.status, SubmissionStatus::Graded);

    // 两侧关系
    let student = tracker.users().get_student(&s1.account.id).expect("student");
    assert_eq!(student.submission_ids, vec![submission.id.clone()]);
    let assignment = tracker.assignments().get_assignment(&hw1.id).expect("hw1");
    assert_eq!(assignment.submissions, vec![submission.id.clone()]);
}

#[test]
fn test_marks_above_max_leave_submitted_status() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let hw1 = create_assignment(&tracker, "HW1", &course.id, &t1.account.id);
    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");

    let submission = tracker
        .assignments()
        .submit_assignment(submit(&hw1.id, &s1.account.id, "answer"))
        .expect("submit");
    assert!(tracker
        .assignments()
        .grade_submission(grade(&submission.id, &t1.account.id, 101))
        .is_err());

    let stored = tracker
        .assignments()
        .get_submission(&submission.id)
        .expect("submission");
    assert_eq!(stored.status, SubmissionStatus::Submitted);
    assert_eq!(stored.marks, None);

    // 满分边界可以接受
    let graded = tracker
        .assignments()
        .grade_submission(grade(&submission.id, &t1.account.id, 100))
        .expect("max marks allowed");
    assert_eq!(graded.marks, Some(100));
}

#[test]
fn test_closed_assignment_rejects_submissions() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let hw1 = create_assignment(&tracker, "HW1", &course.id, &t1.account.id);
    let s2 = register_student(&tracker, "Fatima", "fatima@student.bup.edu.bd");

    let closed = tracker.assignments().close_assignment(&hw1.id).expect("close");
    assert_eq!(closed.status, AssignmentStatus::Closed);
    // 重复关闭无副作用
    tracker
        .assignments()
        .close_assignment(&hw1.id)
        .expect("close again");

    let err = tracker
        .assignments()
        .submit_assignment(submit(&hw1.id, &s2.account.id, "late answer"))
        .expect_err("closed assignment");
    assert_eq!(err.code(), "E003");
    assert!(tracker.assignments().list_submissions().is_empty());
    let student = tracker.users().get_student(&s2.account.id).expect("student");
    assert!(student.submission_ids.is_empty());
}

#[test]
fn test_delete_teacher_leaves_orphaned_instructor() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);

    assert!(tracker
        .users()
        .delete_user_by_email("ahmed@bup.edu.bd")
        .expect("delete"));

    assert!(tracker.users().get_user(&t1.account.id).is_none());
    assert!(tracker.users().get_teacher(&t1.account.id).is_none());
    assert!(tracker.users().list_teachers().is_empty());

    let orphaned = tracker.courses().get_course(&course.id).expect("course kept");
    assert_eq!(orphaned.instructor_id, t1.account.id);
    let stats = tracker
        .courses()
        .course_statistics(&course.id)
        .expect("stats");
    assert_eq!(stats.instructor_name, None);

    // 删除在重启后依然生效
    let restarted = harness.tracker();
    assert!(restarted.users().get_user(&t1.account.id).is_none());
    assert_eq!(
        restarted.courses().get_course(&course.id).expect("course").instructor_id,
        t1.account.id
    );
}

#[test]
fn test_enroll_twice_is_idempotent() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");

    tracker
        .courses()
        .enroll_student(&course.id, &s1.account.id)
        .expect("enroll");
    let course = tracker
        .courses()
        .enroll_student(&course.id, &s1.account.id)
        .expect("enroll again");

    assert_eq!(course.enrolled_students, vec![s1.account.id.clone()]);
    let student = tracker.users().get_student(&s1.account.id).expect("student");
    assert_eq!(student.enrolled_courses, vec![course.id.clone()]);
    assert_eq!(student.enrolled_course_ids, vec![course.id.clone()]);
}

#[test]
fn test_missing_references_are_not_found() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");

    let err = tracker
        .courses()
        .create_course(course_request("CSE-202", "TCH-0404"))
        .expect_err("unknown teacher");
    assert_eq!(err.code(), "E001");
    // 学生不能作为授课教师
    assert!(tracker
        .courses()
        .create_course(course_request("CSE-202", &s1.account.id))
        .is_err());
    assert!(tracker.courses().list_courses().is_empty());

    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let err = tracker
        .courses()
        .enroll_student("CRS-0404", &s1.account.id)
        .expect_err("unknown course");
    assert_eq!(err.code(), "E001");
    let err = tracker
        .courses()
        .enroll_student(&course.id, "STD-0404")
        .expect_err("unknown student");
    assert_eq!(err.code(), "E001");

    let err = tracker
        .assignments()
        .submit_assignment(submit("ASSIGN-0404", &s1.account.id, "x"))
        .expect_err("unknown assignment");
    assert_eq!(err.code(), "E001");
    let err = tracker
        .assignments()
        .grade_submission(grade("SUB-0404", &t1.account.id, 10))
        .expect_err("unknown submission");
    assert_eq!(err.code(), "E001");
    let err = tracker
        .assignments()
        .close_assignment("ASSIGN-0404")
        .expect_err("unknown assignment");
    assert_eq!(err.code(), "E001");
}

#[test]
fn test_course_validation() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    create_course(&tracker, "CSE-202", &t1.account.id);

    let err = tracker
        .courses()
        .create_course(course_request("cse-202", &t1.account.id))
        .expect_err("duplicate code");
    assert_eq!(err.code(), "E002");

    let mut zero_credits = course_request("CSE-303", &t1.account.id);
    zero_credits.credit_hours = 0;
    assert_eq!(
        tracker
            .courses()
            .create_course(zero_credits)
            .expect_err("zero credits")
            .code(),
        "E002"
    );

    let mut blank_name = course_request("CSE-304", &t1.account.id);
    blank_name.name = "  ".to_string();
    assert!(tracker.courses().create_course(blank_name).is_err());

    let teacher = tracker.users().get_teacher(&t1.account.id).expect("teacher");
    assert_eq!(teacher.course_ids.len(), 1);
}

#[test]
fn test_assignment_validation_and_attachments() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);

    let mut zero_marks = assignment_request("HW0", &course.id, &t1.account.id);
    zero_marks.max_marks = 0;
    assert_eq!(
        tracker
            .assignments()
            .create_assignment(zero_marks)
            .expect_err("zero marks")
            .code(),
        "E002"
    );

    let mut with_files = assignment_request("HW1", &course.id, &t1.account.id);
    with_files.attachment_paths = vec![
        "/docs/brief.pdf".to_string(),
        "/docs/brief.pdf".to_string(),
        "/docs/rubric.pdf".to_string(),
    ];
    let hw1 = tracker
        .assignments()
        .create_assignment(with_files)
        .expect("create");
    assert_eq!(hw1.attachment_paths, vec!["/docs/brief.pdf", "/docs/rubric.pdf"]);

    let hw1 = tracker
        .assignments()
        .add_assignment_attachment(&hw1.id, "/docs/brief.pdf")
        .expect("duplicate ignored");
    assert_eq!(hw1.attachment_paths.len(), 2);

    let course = tracker.courses().get_course(&course.id).expect("course");
    assert_eq!(course.assignments, vec![hw1.id.clone()]);
    let teacher = tracker.users().get_teacher(&t1.account.id).expect("teacher");
    assert_eq!(teacher.assignment_ids, vec![hw1.id.clone()]);
    assert_eq!(teacher.assignments_created, vec![hw1.id.clone()]);
}

#[test]
fn test_statistics_and_queries() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let hw1 = create_assignment(&tracker, "HW1", &course.id, &t1.account.id);

    let empty = tracker
        .assignments()
        .assignment_statistics(&hw1.id)
        .expect("stats");
    assert_eq!(empty.total_students, 0);
    assert_eq!(empty.submission_rate, None);

    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");
    let s2 = register_student(&tracker, "Fatima", "fatima@student.bup.edu.bd");
    for student in [&s1, &s2] {
        tracker
            .courses()
            .enroll_student(&course.id, &student.account.id)
            .expect("enroll");
    }
    let submission = tracker
        .assignments()
        .submit_assignment(submit(&hw1.id, &s1.account.id, "answer"))
        .expect("submit");
    tracker
        .assignments()
        .grade_submission(grade(&submission.id, &t1.account.id, 70))
        .expect("grade");

    let stats = tracker
        .assignments()
        .assignment_statistics(&hw1.id)
        .expect("stats");
    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.submitted, 1);
    assert_eq!(stats.graded, 1);
    assert_eq!(stats.submission_rate, Some(50.0));

    let course_stats = tracker
        .courses()
        .course_statistics(&course.id)
        .expect("course stats");
    assert_eq!(course_stats.enrolled_students, 2);
    assert_eq!(course_stats.total_assignments, 1);
    assert_eq!(course_stats.instructor_name.as_deref(), Some("Ahmed"));

    assert_eq!(tracker.courses().courses_by_teacher(&t1.account.id).len(), 1);
    assert_eq!(tracker.courses().courses_for_student(&s2.account.id).len(), 1);
    assert_eq!(tracker.courses().courses_by_department("computer science").len(), 1);
    assert_eq!(tracker.courses().courses_by_semester("FALL 2024").len(), 1);
    assert!(tracker.courses().find_course_by_code("cse-202").is_some());
    assert_eq!(tracker.assignments().assignments_by_course(&course.id).len(), 1);
    assert_eq!(tracker.assignments().assignments_by_teacher(&t1.account.id).len(), 1);
    assert_eq!(tracker.assignments().submissions_for_assignment(&hw1.id).len(), 1);
    assert_eq!(tracker.assignments().submissions_by_student(&s2.account.id).len(), 0);
    assert!(tracker.assignments().overdue_assignments().is_empty());

    let totals = tracker.statistics();
    assert_eq!(totals.users.total, 3);
    assert_eq!(totals.users.teachers, 1);
    assert_eq!(totals.users.students, 2);
    assert_eq!(totals.courses, 1);
    assert_eq!(totals.submissions, 1);
    assert_eq!(totals.graded_submissions, 1);
}

#[test]
fn test_late_and_overdue() {
    let harness = Harness::new();
    let tracker = harness.tracker();
    let t1 = register_teacher(&tracker, "Ahmed", "ahmed@bup.edu.bd");
    let course = create_course(&tracker, "CSE-202", &t1.account.id);
    let mut past_due = assignment_request("HW-late", &course.id, &t1.account.id);
    past_due.due_at = chrono::Utc::now() - chrono::Duration::days(1);
    let hw = tracker
        .assignments()
        .create_assignment(past_due)
        .expect("create");
    assert_eq!(tracker.assignments().overdue_assignments().len(), 1);

    let s1 = register_student(&tracker, "Ali", "ali@student.bup.edu.bd");
    let submission = tracker
        .assignments()
        .submit_assignment(submit(&hw.id, &s1.account.id, "late"))
        .expect("overdue but still active");
    assert!(submission.is_late(&hw));
}
