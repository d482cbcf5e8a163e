pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Schedule, day_name};
pub use requests::CreateScheduleRequest;
pub use responses::{ScheduleDay, ScheduleWeekResponse};
