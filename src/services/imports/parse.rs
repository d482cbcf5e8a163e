//! CSV 解析：表头规范化后按列名取值

use std::collections::HashMap;
use std::io::Cursor;

use tracing::warn;

use crate::models::imports::RawImportRow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 表头规范化：去首尾空白、转小写、内部空白替换为下划线
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// 解析上传的 CSV
///
/// 无法解析的文件返回空列表，只记录警告。
pub fn parse_rows(data: &[u8]) -> Vec<RawImportRow> {
    match try_parse_rows(data) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to parse import file, treating it as empty: {}", e);
            Vec::new()
        }
    }
}

fn try_parse_rows(data: &[u8]) -> Result<Vec<RawImportRow>, csv::Error> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let header_map: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let column = |name: &str| header_map.get(name).copied();
    let nisn_idx = column("nisn");
    let name_idx = column("name");
    let class_idx = column("class");
    let gender_idx = column("gender");

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let get = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        rows.push(RawImportRow {
            nisn: get(nisn_idx),
            name: get(name_idx),
            class: get(class_idx),
            gender: get(gender_idx),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" NISN "), "nisn");
        assert_eq!(normalize_header("Student   Name"), "student_name");
        assert_eq!(normalize_header("Class"), "class");
    }

    #[test]
    fn test_parse_rows_basic() {
        let rows = parse_rows(b"nisn,name,class,gender\n001,Ani,7A,L\n,Budi,7A,x\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            RawImportRow {
                nisn: "001".into(),
                name: "Ani".into(),
                class: "7A".into(),
                gender: "L".into(),
            }
        );
        assert_eq!(rows[1].nisn, "");
        assert_eq!(rows[1].gender, "x");
    }

    #[test]
    fn test_parse_rows_headers_normalized_and_unknown_ignored() {
        let data = "\u{feff} Name ,CLASS,Gender,Phone Number\nAni,7A,p,0812\n";
        let rows = parse_rows(data.as_bytes());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ani");
        assert_eq!(rows[0].class, "7A");
        assert_eq!(rows[0].gender, "p");
        // 缺失列读作空字符串
        assert_eq!(rows[0].nisn, "");
    }

    #[test]
    fn test_parse_rows_skips_empty_lines() {
        let rows = parse_rows(b"nisn,name,class,gender\n\n001,Ani,7A,L\n\n002,Budi,7B,L\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Budi");
    }

    #[test]
    fn test_parse_rows_short_record() {
        let rows = parse_rows(b"nisn,name,class,gender\n001,Ani\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class, "");
        assert_eq!(rows[0].gender, "");
    }

    #[test]
    fn test_parse_rows_malformed_yields_nothing() {
        assert!(parse_rows(b"nisn,name,class,gender\n001,\xff\xfe,7A,L\n").is_empty());
        assert!(parse_rows(b"").is_empty());
    }
}
