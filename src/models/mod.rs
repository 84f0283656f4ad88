pub mod assignments;
pub mod courses;
pub mod submissions;
pub mod system;
pub mod users;
