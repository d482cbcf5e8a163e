//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod attendance;
pub mod behavior_logs;
pub mod grades;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;

use chrono::{DateTime, Utc};

pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
