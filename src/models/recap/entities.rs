use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attendance::AttendanceStatus;
use crate::models::students::Student;

// 汇总加载状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Empty,
}

// 汇总类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub enum RecapKind {
    Attendance,
    Grades,
}

impl std::str::FromStr for RecapKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attendance" => Ok(RecapKind::Attendance),
            "grades" => Ok(RecapKind::Grades),
            _ => Err(format!("Invalid recap kind: {s}")),
        }
    }
}

// 等级：>=85 A，>=70 B，>=60 C，其余 D
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
}

impl LetterGrade {
    pub fn from_average(average: f64) -> Self {
        if average >= 85.0 {
            LetterGrade::A
        } else if average >= 70.0 {
            LetterGrade::B
        } else if average >= 60.0 {
            LetterGrade::C
        } else {
            LetterGrade::D
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct AttendanceRecapRow {
    pub student: Student,
    pub hadir: u32,
    pub izin: u32,
    pub sakit: u32,
    pub alpa: u32,
    pub total: u32,
    /// 仅在 total > 0 时存在
    pub percentage: Option<u32>,
    /// 与 dates 一一对应
    pub days: Vec<Option<AttendanceStatus>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct AttendanceTotals {
    pub hadir: u32,
    pub izin: u32,
    pub sakit: u32,
    pub alpa: u32,
    pub total: u32,
    pub percentage: Option<u32>,
}

// 考勤汇总
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct AttendanceRecap {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<AttendanceRecapRow>,
    pub totals: AttendanceTotals,
}

// 成绩列：同一天的不同评估各占一列
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct GradeColumn {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct GradeRecapRow {
    pub student: Student,
    /// 与 columns 一一对应
    pub cells: Vec<Option<f64>>,
    pub average: Option<f64>,
    pub letter: Option<LetterGrade>,
}

// 成绩汇总
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct GradeRecap {
    pub columns: Vec<GradeColumn>,
    pub rows: Vec<GradeRecapRow>,
    pub column_averages: Vec<Option<f64>>,
    pub class_average: Option<f64>,
}
