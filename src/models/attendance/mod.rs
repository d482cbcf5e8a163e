pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{AttendanceRecord, AttendanceStatus, StatusCounts};
pub use requests::{AttendanceEntryInput, AttendanceSheetQuery, SaveAttendanceRequest};
pub use responses::{AttendanceSheet, AttendanceSheetRow, SaveAttendanceResponse};
