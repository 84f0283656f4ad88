pub mod password;
pub mod random_code;
pub mod validate;

pub use password::{hash_password, verify_password};
pub use random_code::generate_verification_code;
pub use validate::{validate_email, validate_password, validate_registration, validate_required};

/// 向列表追加元素，已存在时忽略；返回是否发生了追加
pub fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|existing| existing == value) {
        return false;
    }
    list.push(value.to_string());
    true
}
