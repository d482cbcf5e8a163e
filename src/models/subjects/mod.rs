pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Subject, SubjectItem};
pub use requests::CreateSubjectRequest;
pub use responses::SubjectListResponse;
