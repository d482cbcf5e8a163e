use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    #[serde(rename = "Hadir")]
    Present,
    #[serde(rename = "Izin")]
    Permitted,
    #[serde(rename = "Sakit")]
    Sick,
    #[serde(rename = "Alpa")]
    Absent,
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "Hadir";
    pub const PERMITTED: &'static str = "Izin";
    pub const SICK: &'static str = "Sakit";
    pub const ABSENT: &'static str = "Alpa";

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => Self::PRESENT,
            AttendanceStatus::Permitted => Self::PERMITTED,
            AttendanceStatus::Sick => Self::SICK,
            AttendanceStatus::Absent => Self::ABSENT,
        }
    }

    /// 报表中的单字母代码
    pub fn short_code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "H",
            AttendanceStatus::Permitted => "I",
            AttendanceStatus::Sick => "S",
            AttendanceStatus::Absent => "A",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::PERMITTED => Ok(AttendanceStatus::Permitted),
            AttendanceStatus::SICK => Ok(AttendanceStatus::Sick),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 考勤记录，(student_id, date) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

// 各状态计数
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StatusCounts {
    pub hadir: u32,
    pub izin: u32,
    pub sakit: u32,
    pub alpa: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.hadir += 1,
            AttendanceStatus::Permitted => self.izin += 1,
            AttendanceStatus::Sick => self.sakit += 1,
            AttendanceStatus::Absent => self.alpa += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.hadir + self.izin + self.sakit + self.alpa
    }

    pub fn absorb(&mut self, other: &StatusCounts) {
        self.hadir += other.hadir;
        self.izin += other.izin;
        self.sakit += other.sakit;
        self.alpa += other.alpa;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Permitted).unwrap(),
            "\"Izin\""
        );
        assert_eq!(
            "Alpa".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Absent
        );
        assert!("hadir".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_status_counts() {
        let mut counts = StatusCounts::default();
        counts.record(AttendanceStatus::Present);
        counts.record(AttendanceStatus::Present);
        counts.record(AttendanceStatus::Sick);
        assert_eq!(counts.hadir, 2);
        assert_eq!(counts.sakit, 1);
        assert_eq!(counts.total(), 3);
    }
}
