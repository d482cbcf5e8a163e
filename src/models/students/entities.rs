use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生性别：L = 男，P = 女
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum Gender {
    #[serde(rename = "L")]
    Male,
    #[serde(rename = "P")]
    Female,
}

impl Gender {
    pub const MALE: &'static str = "L";
    pub const FEMALE: &'static str = "P";

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => Self::MALE,
            Gender::Female => Self::FEMALE,
        }
    }

    /// 宽松解析：先去空白再转大写
    pub fn parse_loose(raw: &str) -> Option<Self> {
        raw.trim().to_uppercase().parse().ok()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Gender::MALE => Ok(Gender::Male),
            Gender::FEMALE => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {s}")),
        }
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    #[ts(skip)]
    #[serde(skip_serializing, default)]
    pub teacher_id: i64,
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: Gender,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    /// 姓名不区分大小写匹配，或 NISN 子串匹配；空搜索匹配全部
    pub fn matches_search(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&search.to_lowercase())
            || self.nisn.as_deref().is_some_and(|n| n.contains(search))
    }
}

// 新建学生（存储层输入）
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: Gender,
}

// 导入更新时替换的字段，nisn 保持不变
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub class: String,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, nisn: Option<&str>) -> Student {
        Student {
            id: 1,
            teacher_id: 1,
            nisn: nisn.map(str::to_string),
            name: name.to_string(),
            class: "7A".to_string(),
            gender: Gender::Female,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_gender_parse_loose() {
        assert_eq!(Gender::parse_loose(" l "), Some(Gender::Male));
        assert_eq!(Gender::parse_loose("P"), Some(Gender::Female));
        assert_eq!(Gender::parse_loose("X"), None);
        assert_eq!(Gender::parse_loose(""), None);
    }

    #[test]
    fn test_gender_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"L\"");
    }

    #[test]
    fn test_matches_search() {
        let s = student("Siti Rahayu", Some("0987654321"));
        assert!(s.matches_search(""));
        assert!(s.matches_search("siti"));
        assert!(s.matches_search("RAHAYU"));
        assert!(s.matches_search("7654"));
        assert!(!s.matches_search("budi"));
        assert!(!student("Budi", None).matches_search("123"));
    }
}
