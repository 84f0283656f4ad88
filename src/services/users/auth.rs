use tracing::{info, warn};

use super::UserService;
use crate::errors::{Result, TrackerError};
use crate::models::users::entities::User;
use crate::services::lock;
use crate::utils::password::verify_password;
use crate::utils::random_code::generate_verification_code;

pub fn authenticate(service: &UserService, email: &str, password: &str) -> Result<User> {
    let users = lock(&service.users);
    let user = users
        .find_by_email(email)
        .filter(|user| verify_password(password, &user.account().password_hash))
        .ok_or_else(|| {
            warn!("Failed login attempt for {}", email.trim());
            TrackerError::authentication("Invalid email or password")
        })?;

    if !user.account().active {
        return Err(TrackerError::authentication(format!(
            "Account {} is deactivated",
            user.id()
        )));
    }

    info!("User {} authenticated", user.id());
    Ok(user.clone())
}

/// 校验验证码，成功后清除验证码；验证码不匹配返回 `Ok(false)`
pub fn verify_email(service: &UserService, email: &str, code: &str) -> Result<bool> {
    let mut users = lock(&service.users);
    let user_id = users
        .find_by_email(email)
        .map(|user| user.id().to_string())
        .ok_or_else(|| TrackerError::not_found(format!("No user with email {}", email.trim())))?;

    let Some(user) = users.get_mut(&user_id) else {
        return Err(TrackerError::not_found(format!("User {user_id} not found")));
    };
    let account = user.account_mut();
    if account.email_verification_code.as_deref() != Some(code.trim()) {
        return Ok(false);
    }
    account.email_verified = true;
    account.email_verification_code = None;

    info!("Email verified for user {}", user_id);
    service.persist(&users)?;
    Ok(true)
}

/// 为未验证的账号生成新验证码；已验证的账号返回 `Ok(false)`
pub fn resend_verification_code(service: &UserService, email: &str) -> Result<bool> {
    let (to, code, persisted) = {
        let mut users = lock(&service.users);
        let user_id = users
            .find_by_email(email)
            .map(|user| user.id().to_string())
            .ok_or_else(|| {
                TrackerError::not_found(format!("No user with email {}", email.trim()))
            })?;

        let Some(user) = users.get_mut(&user_id) else {
            return Err(TrackerError::not_found(format!("User {user_id} not found")));
        };
        let account = user.account_mut();
        if account.email_verified {
            return Ok(false);
        }
        let code = generate_verification_code();
        account.email_verification_code = Some(code.clone());
        let to = account.email.clone();
        (to, code, service.persist(&users))
    };

    service.send_verification(&to, &code);
    info!("Verification code resent to {}", to);
    persisted?;
    Ok(true)
}
