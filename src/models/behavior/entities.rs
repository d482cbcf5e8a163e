use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 行为记录类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub enum BehaviorKind {
    Positive,
    Negative,
}

impl BehaviorKind {
    pub const POSITIVE: &'static str = "positive";
    pub const NEGATIVE: &'static str = "negative";

    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorKind::Positive => Self::POSITIVE,
            BehaviorKind::Negative => Self::NEGATIVE,
        }
    }
}

impl std::fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BehaviorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BehaviorKind::POSITIVE => Ok(BehaviorKind::Positive),
            BehaviorKind::NEGATIVE => Ok(BehaviorKind::Negative),
            _ => Err(format!("Invalid behavior type: {s}")),
        }
    }
}

// 行为记录（只追加）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorLog {
    pub id: i64,
    pub student_id: i64,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub kind: BehaviorKind,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 列表项，附带学生姓名与班级
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorLogItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub log: BehaviorLog,
    pub student_name: String,
    pub student_class: String,
}

impl BehaviorLogItem {
    /// search 需已转小写；匹配学生姓名或描述
    pub fn matches_search(&self, search: &str) -> bool {
        search.is_empty()
            || self.student_name.to_lowercase().contains(search)
            || self.log.description.to_lowercase().contains(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_serializes_kind_as_type() {
        let log = BehaviorLog {
            id: 1,
            student_id: 2,
            kind: BehaviorKind::Negative,
            description: "Terlambat".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            created_at: chrono::Utc::now(),
        };
        let item = BehaviorLogItem {
            log,
            student_name: "Ani".to_string(),
            student_class: "7A".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "negative");
        assert_eq!(json["student_name"], "Ani");
        assert_eq!(json["date"], "2024-03-04");

        assert!(item.matches_search("ani"));
        assert!(item.matches_search("terlambat"));
        assert!(!item.matches_search("budi"));
    }
}
