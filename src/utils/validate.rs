use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

/// 必填字段校验（去除首尾空白后不能为空）
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(())
}

pub fn validate_password(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

/// 注册信息校验：姓名、邮箱、密码，返回第一条错误
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    min_password_length: usize,
) -> Result<(), String> {
    validate_required("Name", name)?;
    validate_email(email).map_err(str::to_string)?;
    validate_password(password, min_password_length)
}
