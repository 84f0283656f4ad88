use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::requests::{RegisterStudentRequest, RegisterTeacherRequest};
use crate::notify::{EmailSender, create_email_sender};
use crate::services::AssignmentTracker;
use crate::storage::{PartitionStore, PersistenceAdapter, create_storage};

pub struct StartupContext {
    pub backend: Arc<dyn PartitionStore>,
    pub tracker: AssignmentTracker,
}

/// 根据配置创建存储、邮件发送器与全部服务
pub fn prepare_tracker(config: &AppConfig) -> Result<StartupContext> {
    let backend = create_storage(&config.storage)?;
    let mailer = create_email_sender(&config.email)?;
    prepare_tracker_with(config, backend, mailer)
}

/// 使用外部提供的后端与发送器构建，便于测试注入
pub fn prepare_tracker_with(
    config: &AppConfig,
    backend: Arc<dyn PartitionStore>,
    mailer: Arc<dyn EmailSender>,
) -> Result<StartupContext> {
    let adapter = Arc::new(PersistenceAdapter::new(backend.clone(), &config.storage)?);
    debug!(
        "Persistence adapter ready (policy: {:?}, reconcile counters: {})",
        adapter.policy(),
        adapter.reconciles_counters()
    );

    let tracker = AssignmentTracker::new(adapter, mailer, config)?;

    if config.app.seed_sample_data {
        if tracker.users().is_first_run() {
            seed_sample_data(&tracker)?;
        } else {
            debug!("Existing data found, skipping sample data");
        }
    }

    Ok(StartupContext { backend, tracker })
}

/// 首次运行时写入演示数据
pub fn seed_sample_data(tracker: &AssignmentTracker) -> Result<()> {
    info!("First run detected, creating sample data...");
    let users = tracker.users();
    let courses = tracker.courses();

    let ahmed = users.register_teacher(RegisterTeacherRequest {
        name: "Dr. Ahmed Rahman".to_string(),
        email: "ahmed@bup.edu.bd".to_string(),
        password: "password123".to_string(),
        department: "Computer Science".to_string(),
        employee_id: "EMP001".to_string(),
    })?;
    let sarah = users.register_teacher(RegisterTeacherRequest {
        name: "Prof. Sarah Khan".to_string(),
        email: "sarah@bup.edu.bd".to_string(),
        password: "password123".to_string(),
        department: "Business Administration".to_string(),
        employee_id: "EMP002".to_string(),
    })?;

    let ali = users.register_student(RegisterStudentRequest {
        name: "Mohammad Ali".to_string(),
        email: "ali@student.bup.edu.bd".to_string(),
        password: "student123".to_string(),
        student_id: "201901001".to_string(),
        program: "CSE".to_string(),
        semester: 7,
    })?;
    let fatima = users.register_student(RegisterStudentRequest {
        name: "Fatima Hassan".to_string(),
        email: "fatima@student.bup.edu.bd".to_string(),
        password: "student123".to_string(),
        student_id: "201901002".to_string(),
        program: "CSE".to_string(),
        semester: 7,
    })?;

    let oop = courses.create_course(CreateCourseRequest {
        name: "Object Oriented Programming".to_string(),
        code: "CSE-202".to_string(),
        department: "Computer Science".to_string(),
        credit_hours: 3,
        semester: "Fall 2024".to_string(),
        instructor_id: ahmed.account.id.clone(),
    })?;
    let bba = courses.create_course(CreateCourseRequest {
        name: "Business Management".to_string(),
        code: "BBA-101".to_string(),
        department: "Business Administration".to_string(),
        credit_hours: 3,
        semester: "Fall 2024".to_string(),
        instructor_id: sarah.account.id.clone(),
    })?;

    courses.enroll_student(&oop.id, &ali.account.id)?;
    courses.enroll_student(&oop.id, &fatima.account.id)?;
    courses.enroll_student(&bba.id, &ali.account.id)?;

    warn!("Sample data created, default passwords are password123 / student123");
    Ok(())
}
