pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::GradeRecord;
pub use requests::{GradeEntryInput, GradeSheetQuery, SaveGradesRequest};
pub use responses::{GradeSheet, GradeSheetRow, SaveGradesResponse};
