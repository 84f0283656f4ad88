//! 集成测试公共工具
//!
//! 内存后端 + 低成本 argon2 参数 + 记录型邮件发送器。同一个 `Harness`
//! 多次调用 `tracker()` 即模拟进程重启。

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use rust_assignment_tracker::config::{AppConfig, Argon2Config, WritePolicy};
use rust_assignment_tracker::errors::{Result, TrackerError};
use rust_assignment_tracker::models::assignments::{
    entities::{Assignment, AssignmentType},
    requests::CreateAssignmentRequest,
};
use rust_assignment_tracker::models::courses::{entities::Course, requests::CreateCourseRequest};
use rust_assignment_tracker::models::users::{
    entities::{Student, Teacher},
    requests::{RegisterStudentRequest, RegisterTeacherRequest},
};
use rust_assignment_tracker::notify::EmailSender;
use rust_assignment_tracker::runtime::lifetime::startup::prepare_tracker_with;
use rust_assignment_tracker::services::AssignmentTracker;
use rust_assignment_tracker::storage::MemoryStorage;

pub const TEACHER_PASSWORD: &str = "password123";
pub const STUDENT_PASSWORD: &str = "student123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 记录所有投递；`failing` 为真时投递失败但仍记录
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    failing: bool,
}

impl RecordingEmailSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailSender for RecordingEmailSender {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.failing {
            return Err(TrackerError::email_delivery("smtp unreachable"));
        }
        Ok(())
    }
}

pub fn test_config(policy: WritePolicy) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.backend = "memory".to_string();
    config.storage.write_policy = policy;
    config.security.argon2 = Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    };
    config
}

pub struct Harness {
    pub backend: Arc<MemoryStorage>,
    pub mailer: Arc<RecordingEmailSender>,
    pub config: AppConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(test_config(WritePolicy::FailFast))
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            backend: Arc::new(MemoryStorage::new()),
            mailer: Arc::new(RecordingEmailSender::default()),
            config,
        }
    }

    pub fn try_tracker(&self) -> Result<AssignmentTracker> {
        prepare_tracker_with(&self.config, self.backend.clone(), self.mailer.clone())
            .map(|startup| startup.tracker)
    }

    /// 基于当前后端数据构建一个新的实例
    pub fn tracker(&self) -> AssignmentTracker {
        match self.try_tracker() {
            Ok(tracker) => tracker,
            Err(e) => panic!("tracker should start: {e}"),
        }
    }
}

pub fn register_teacher(tracker: &AssignmentTracker, name: &str, email: &str) -> Teacher {
    tracker
        .users()
        .register_teacher(RegisterTeacherRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: TEACHER_PASSWORD.to_string(),
            department: "Computer Science".to_string(),
            employee_id: format!("EMP-{name}"),
        })
        .expect("register teacher")
}

pub fn register_student(tracker: &AssignmentTracker, name: &str, email: &str) -> Student {
    tracker
        .users()
        .register_student(RegisterStudentRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: STUDENT_PASSWORD.to_string(),
            student_id: format!("2019-{name}"),
            program: "CSE".to_string(),
            semester: 7,
        })
        .expect("register student")
}

pub fn course_request(code: &str, instructor_id: &str) -> CreateCourseRequest {
    CreateCourseRequest {
        name: format!("Course {code}"),
        code: code.to_string(),
        department: "Computer Science".to_string(),
        credit_hours: 3,
        semester: "Fall 2024".to_string(),
        instructor_id: instructor_id.to_string(),
    }
}

pub fn create_course(tracker: &AssignmentTracker, code: &str, instructor_id: &str) -> Course {
    tracker
        .courses()
        .create_course(course_request(code, instructor_id))
        .expect("create course")
}

pub fn assignment_request(title: &str, course_id: &str, creator_id: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        title: title.to_string(),
        description: format!("{title} description"),
        course_id: course_id.to_string(),
        creator_id: creator_id.to_string(),
        kind: AssignmentType::Homework,
        max_marks: 100,
        due_at: Utc::now() + Duration::days(7),
        attachment_paths: Vec::new(),
    }
}

pub fn create_assignment(
    tracker: &AssignmentTracker,
    title: &str,
    course_id: &str,
    creator_id: &str,
) -> Assignment {
    tracker
        .assignments()
        .create_assignment(assignment_request(title, course_id, creator_id))
        .expect("create assignment")
}

/// 读取后端中分区的原始 JSON
pub fn raw_json(
    backend: &MemoryStorage,
    kind: rust_assignment_tracker::storage::PartitionKind,
) -> serde_json::Value {
    let bytes = backend.raw(kind).expect("partition written");
    serde_json::from_slice(&bytes).expect("valid json")
}

pub fn put_json(
    backend: &MemoryStorage,
    kind: rust_assignment_tracker::storage::PartitionKind,
    value: &serde_json::Value,
) {
    backend.insert_raw(kind, serde_json::to_vec(value).expect("encode"));
}
