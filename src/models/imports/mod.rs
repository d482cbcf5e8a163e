pub mod entities;
pub mod responses;

pub use entities::{
    ImportJobStatus, ImportPlan, ImportTally, InvalidRow, RawImportRow, ReconciledRows, ValidRow,
};
pub use responses::{ImportPreviewResponse, ImportProgressResponse, StartImportResponse};
