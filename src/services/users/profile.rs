use tracing::info;

use super::UserService;
use crate::errors::{Result, TrackerError};
use crate::models::users::{entities::User, requests::UpdateProfileRequest};
use crate::services::lock;
use crate::utils::validate::{validate_email, validate_required};

pub fn update_profile(
    service: &UserService,
    user_id: &str,
    req: UpdateProfileRequest,
) -> Result<User> {
    validate_required("Name", &req.name).map_err(TrackerError::validation)?;
    validate_email(&req.email).map_err(TrackerError::validation)?;

    let mut users = lock(&service.users);
    if users.get(user_id).is_none() {
        return Err(TrackerError::not_found(format!("User {user_id} not found")));
    }
    if users.email_taken(&req.email, Some(user_id)) {
        return Err(TrackerError::validation(format!(
            "Email {} is already registered",
            req.email.trim()
        )));
    }

    let Some(user) = users.get_mut(user_id) else {
        return Err(TrackerError::not_found(format!("User {user_id} not found")));
    };
    let account = user.account_mut();
    account.name = req.name.trim().to_string();
    account.email = req.email.trim().to_string();
    let updated = user.clone();

    info!("User profile updated: {}", user_id);
    service.persist(&users)?;
    Ok(updated)
}

pub fn deactivate_user(service: &UserService, user_id: &str) -> Result<User> {
    let mut users = lock(&service.users);
    let Some(user) = users.get_mut(user_id) else {
        return Err(TrackerError::not_found(format!("User {user_id} not found")));
    };
    user.account_mut().active = false;
    let updated = user.clone();

    info!("User deactivated: {}", user_id);
    service.persist(&users)?;
    Ok(updated)
}
