use tracing::{info, warn};

use super::UserService;
use crate::errors::Result;
use crate::services::lock;

/// 删除用户
///
/// 只从用户分区移除，课程与作业中对该用户的引用保持原样。
pub fn delete_user(service: &UserService, user_id: &str) -> Result<bool> {
    let mut users = lock(&service.users);
    let Some(user) = users.remove(user_id) else {
        warn!("User not found with id: {}", user_id);
        return Ok(false);
    };

    info!(
        "{} deleted: {} ({})",
        user.role(),
        user.name(),
        user.email()
    );
    service.persist(&users)?;
    Ok(true)
}

pub fn delete_user_by_email(service: &UserService, email: &str) -> Result<bool> {
    let user_id = lock(&service.users)
        .find_by_email(email)
        .map(|user| user.id().to_string());
    match user_id {
        Some(id) => delete_user(service, &id),
        None => {
            warn!("User not found with email: {}", email.trim());
            Ok(false)
        }
    }
}
