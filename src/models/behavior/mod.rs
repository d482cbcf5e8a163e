pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{BehaviorKind, BehaviorLog, BehaviorLogItem};
pub use requests::{BehaviorListQuery, CreateBehaviorRequest};
pub use responses::BehaviorListResponse;
