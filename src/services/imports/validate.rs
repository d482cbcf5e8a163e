//! 行校验：纯函数，不访问存储

use crate::models::imports::{InvalidRow, RawImportRow, ValidRow};
use crate::models::students::Gender;

pub const NAME_EMPTY: &str = "name empty";
pub const CLASS_EMPTY: &str = "class empty";
pub const GENDER_INVALID: &str = "gender must be L/P";

// 表头占第 1 行
const FIRST_DATA_LINE: usize = 2;

/// 校验单行，返回规范化后的行或违规列表
pub fn validate_row(row: &RawImportRow) -> Result<ValidRow, Vec<String>> {
    let name = row.name.trim();
    let class = row.class.trim();
    let gender = Gender::parse_loose(&row.gender);

    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push(NAME_EMPTY.to_string());
    }
    if class.is_empty() {
        errors.push(CLASS_EMPTY.to_string());
    }

    match gender {
        Some(gender) if errors.is_empty() => {
            let nisn = row.nisn.trim();
            Ok(ValidRow {
                nisn: (!nisn.is_empty()).then(|| nisn.to_string()),
                name: name.to_string(),
                class: class.to_string(),
                gender,
            })
        }
        Some(_) => Err(errors),
        None => {
            errors.push(GENDER_INVALID.to_string());
            Err(errors)
        }
    }
}

/// 按原始顺序划分有效行与无效行
pub fn validate_rows(rows: &[RawImportRow]) -> (Vec<ValidRow>, Vec<InvalidRow>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(row) {
            Ok(row) => valid.push(row),
            Err(errors) => invalid.push(InvalidRow {
                line: index + FIRST_DATA_LINE,
                errors,
            }),
        }
    }

    (valid, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(nisn: &str, name: &str, class: &str, gender: &str) -> RawImportRow {
        RawImportRow {
            nisn: nisn.into(),
            name: name.into(),
            class: class.into(),
            gender: gender.into(),
        }
    }

    #[test]
    fn test_ani_and_budi() {
        let rows = vec![raw("001", "Ani", "7A", "L"), raw("", "Budi", "7A", "x")];
        let (valid, invalid) = validate_rows(&rows);

        assert_eq!(
            valid,
            vec![ValidRow {
                nisn: Some("001".into()),
                name: "Ani".into(),
                class: "7A".into(),
                gender: Gender::Male,
            }]
        );
        assert_eq!(
            invalid,
            vec![InvalidRow {
                line: 3,
                errors: vec![GENDER_INVALID.to_string()],
            }]
        );
    }

    #[test]
    fn test_values_trimmed_and_gender_normalized() {
        let row = validate_row(&raw("  ", "  Siti ", " 8B ", " p ")).unwrap();
        assert_eq!(row.nisn, None);
        assert_eq!(row.name, "Siti");
        assert_eq!(row.class, "8B");
        assert_eq!(row.gender, Gender::Female);
    }

    #[test]
    fn test_all_errors_in_order() {
        let errors = validate_row(&raw("1", " ", "", "M")).unwrap_err();
        assert_eq!(errors, vec![NAME_EMPTY, CLASS_EMPTY, GENDER_INVALID]);
    }

    #[test]
    fn test_partition_is_exhaustive() {
        let rows = vec![
            raw("1", "A", "7A", "L"),
            raw("2", "", "7A", "L"),
            raw("3", "C", "7A", "P"),
            raw("4", "D", "", "?"),
        ];
        let (valid, invalid) = validate_rows(&rows);
        assert_eq!(valid.len() + invalid.len(), rows.len());
        assert_eq!(invalid.iter().map(|r| r.line).collect::<Vec<_>>(), vec![3, 5]);
        assert!(invalid.iter().all(|r| !r.errors.is_empty()));
    }
}
