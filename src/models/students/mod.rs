pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Gender, NewStudent, Student, StudentFields};
pub use requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest};
pub use responses::{ClassListResponse, StudentListResponse};
