use serde::Serialize;

/// 业务错误码
///
/// 按模块分段：认证 1xxx、学生 2xxx、导入 3xxx、考勤 4xxx、成绩 5xxx、
/// 行为记录 6xxx、课程表 7xxx、科目 8xxx、通用 9xxx。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 认证
    AuthFailed = 1000,
    RegisterFailed = 1001,
    EmailAlreadyExists = 1002,
    EmailInvalid = 1003,
    PasswordTooWeak = 1004,
    ProfileUpdateFailed = 1005,

    // 学生
    StudentNotFound = 2000,
    StudentNisnConflict = 2001,
    StudentInvalid = 2002,
    StudentNotOwned = 2003,

    // 导入
    ImportFileMissing = 3000,
    ImportFileTooLarge = 3001,
    ImportFileDataInvalid = 3002,
    ImportTooManyRows = 3003,
    ImportJobNotFound = 3004,

    // 考勤
    AttendanceInvalid = 4000,
    AttendanceSaveFailed = 4001,

    // 成绩
    GradeScoreInvalid = 5000,
    GradeSubjectRequired = 5001,
    GradeSaveFailed = 5002,

    // 行为记录
    BehaviorLogNotFound = 6000,
    BehaviorLogInvalid = 6001,

    // 课程表
    ScheduleNotFound = 7000,
    ScheduleInvalid = 7001,

    // 科目
    SubjectNotFound = 8000,
    SubjectAlreadyExists = 8001,
    SubjectInvalid = 8002,

    // 通用
    BadRequest = 9000,
    Unauthorized = 9001,
    Forbidden = 9002,
    NotFound = 9003,
    InternalServerError = 9004,
    ValidationFailed = 9005,
    RecapFilterInvalid = 9006,
}
