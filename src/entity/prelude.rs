//! 预导入模块，方便使用

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::behavior_logs::{
    ActiveModel as BehaviorLogActiveModel, Entity as BehaviorLogs, Model as BehaviorLogModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
