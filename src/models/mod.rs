pub mod attendance;
pub mod auth;
pub mod behavior;
pub mod common;
pub mod dashboard;
pub mod grades;
pub mod imports;
pub mod recap;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use common::{ApiResponse, ErrorCode};

