pub mod auth;

pub mod students;

pub mod attendance;

pub mod grades;

pub mod recap;

pub mod behavior;

pub mod schedules;

pub mod subjects;

pub mod dashboard;

pub mod reports;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use behavior::configure_behavior_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grades_routes;
pub use recap::configure_recap_routes;
pub use reports::configure_reports_routes;
pub use schedules::configure_schedules_routes;
pub use students::configure_students_routes;
pub use subjects::configure_subjects_routes;
