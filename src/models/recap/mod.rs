pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{
    AttendanceRecap, AttendanceRecapRow, AttendanceTotals, GradeColumn, GradeRecap,
    GradeRecapRow, LetterGrade, LoadState, RecapKind,
};
pub use requests::{AttendanceRecapQuery, GradeRecapQuery};
pub use responses::{LoadSlotResponse, RecapResponse};
