//! 业务服务层
//!
//! 各服务通过共享的存储句柄协作，不使用全局单例。需要同时持有多个
//! 存储锁时，一律按 用户 → 课程 → 作业 的顺序获取。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod assignments;
pub mod courses;
pub mod session;
pub mod stores;
pub mod users;

pub use assignments::AssignmentService;
pub use courses::CourseService;
pub use session::AssignmentTracker;
pub use stores::{AssignmentStore, CourseStore, UserStore};
pub use users::UserService;

pub type Shared<T> = Arc<Mutex<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// 获取锁；持锁线程 panic 后数据仍然可用，直接取回
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
