use tracing::info;

use super::UserService;
use crate::errors::{Result, TrackerError};
use crate::models::users::{
    entities::{Student, Teacher, User, UserAccount, UserRole},
    requests::{RegisterStudentRequest, RegisterTeacherRequest},
};
use crate::services::lock;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_verification_code;
use crate::utils::validate::{validate_registration, validate_required};

/// 校验公共字段并生成账号，ID 与验证码在持锁后写入
fn prepare_account(service: &UserService, name: &str, email: &str, password: &str) -> Result<UserAccount> {
    validate_registration(name, email, password, service.security.min_password_length)
        .map_err(TrackerError::validation)?;
    let password_hash = hash_password(password, &service.security.argon2)?;
    Ok(UserAccount::new(
        String::new(),
        name.trim().to_string(),
        email.trim().to_string(),
        password_hash,
    ))
}

pub fn register_teacher(service: &UserService, req: RegisterTeacherRequest) -> Result<Teacher> {
    validate_required("Department", &req.department).map_err(TrackerError::validation)?;
    validate_required("Employee ID", &req.employee_id).map_err(TrackerError::validation)?;
    let mut account = prepare_account(service, &req.name, &req.email, &req.password)?;

    let code = generate_verification_code();
    let (teacher, persisted) = {
        let mut users = lock(&service.users);
        if users.email_taken(&account.email, None) {
            return Err(TrackerError::validation(format!(
                "Email {} is already registered",
                account.email
            )));
        }
        account.id = users.allocate_id(UserRole::Teacher);
        account.email_verification_code = Some(code.clone());

        let teacher = Teacher::new(
            account,
            req.department.trim().to_string(),
            req.employee_id.trim().to_string(),
        );
        users.insert(User::Teacher(teacher.clone()));
        (teacher, service.persist(&users))
    };

    info!(
        "Teacher registered (verification required): {} [{}]",
        teacher.account.name, teacher.account.id
    );
    service.send_verification(&teacher.account.email, &code);
    persisted?;
    Ok(teacher)
}

pub fn register_student(service: &UserService, req: RegisterStudentRequest) -> Result<Student> {
    validate_required("Student ID", &req.student_id).map_err(TrackerError::validation)?;
    validate_required("Program", &req.program).map_err(TrackerError::validation)?;
    if req.semester == 0 {
        return Err(TrackerError::validation("Semester must be at least 1"));
    }
    let mut account = prepare_account(service, &req.name, &req.email, &req.password)?;

    let code = generate_verification_code();
    let (student, persisted) = {
        let mut users = lock(&service.users);
        if users.email_taken(&account.email, None) {
            return Err(TrackerError::validation(format!(
                "Email {} is already registered",
                account.email
            )));
        }
        account.id = users.allocate_id(UserRole::Student);
        account.email_verification_code = Some(code.clone());

        let student = Student::new(
            account,
            req.student_id.trim().to_string(),
            req.program.trim().to_string(),
            req.semester,
        );
        users.insert(User::Student(student.clone()));
        (student, service.persist(&users))
    };

    info!(
        "Student registered (verification required): {} [{}]",
        student.account.name, student.account.id
    );
    service.send_verification(&student.account.email, &code);
    persisted?;
    Ok(student)
}
