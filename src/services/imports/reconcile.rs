use std::collections::HashMap;

use crate::models::imports::{ReconciledRows, ValidRow};

/// 有效行中出现的 NISN，去重
pub fn collect_nisns(rows: &[ValidRow]) -> Vec<String> {
    let mut nisns: Vec<String> = rows.iter().filter_map(|r| r.nisn.clone()).collect();
    nisns.sort();
    nisns.dedup();
    nisns
}

/// 文件内重复出现的 NISN，排序去重
///
/// 重复的新 NISN 会触发唯一索引，使所在批次整体失败。
pub fn duplicate_nisns(rows: &[ValidRow]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for nisn in rows.iter().filter_map(|r| r.nisn.as_deref()) {
        *counts.entry(nisn).or_default() += 1;
    }

    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(nisn, _)| nisn.to_string())
        .collect();
    duplicates.sort();
    duplicates
}

/// 按 NISN 把有效行划分为更新与插入
///
/// `existing` 只包含当前教师名下学生的 NISN -> ID。
pub fn reconcile(rows: Vec<ValidRow>, existing: &HashMap<String, i64>) -> ReconciledRows {
    let mut reconciled = ReconciledRows::default();

    for row in rows {
        match row.nisn.as_ref().and_then(|nisn| existing.get(nisn)) {
            Some(&student_id) => reconciled.to_update.push((student_id, row)),
            None => reconciled.to_insert.push(row),
        }
    }

    reconciled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::Gender;

    fn row(nisn: Option<&str>, name: &str) -> ValidRow {
        ValidRow {
            nisn: nisn.map(str::to_string),
            name: name.into(),
            class: "7A".into(),
            gender: Gender::Female,
        }
    }

    #[test]
    fn test_reconcile_partition() {
        let existing = HashMap::from([("001".to_string(), 10), ("002".to_string(), 11)]);
        let rows = vec![
            row(Some("001"), "Ani"),
            row(None, "Budi"),
            row(Some("999"), "Citra"),
            row(Some("002"), "Dewi"),
        ];

        let reconciled = reconcile(rows.clone(), &existing);

        assert_eq!(
            reconciled.to_update,
            vec![(10, rows[0].clone()), (11, rows[3].clone())]
        );
        assert_eq!(reconciled.to_insert, vec![rows[1].clone(), rows[2].clone()]);
        assert_eq!(
            reconciled.to_insert.len() + reconciled.to_update.len(),
            rows.len()
        );
    }

    #[test]
    fn test_rows_without_nisn_always_insert() {
        let existing = HashMap::from([(String::new(), 1)]);
        let reconciled = reconcile(vec![row(None, "Eka")], &existing);
        assert_eq!(reconciled.to_insert.len(), 1);
        assert!(reconciled.to_update.is_empty());
    }

    #[test]
    fn test_duplicate_nisns_within_file() {
        let rows = vec![
            row(Some("300"), "Ani"),
            row(None, "Budi"),
            row(Some("100"), "Citra"),
            row(None, "Dewi"),
            row(Some("300"), "Eka"),
            row(Some("100"), "Fajar"),
            row(Some("200"), "Gita"),
        ];
        assert_eq!(duplicate_nisns(&rows), vec!["100".to_string(), "300".to_string()]);
        assert!(duplicate_nisns(&rows[..4]).is_empty());

        // 对账仍保持纯划分，重复行都进入插入
        let reconciled = reconcile(rows, &HashMap::new());
        assert_eq!(reconciled.to_insert.len(), 7);
    }

    #[test]
    fn test_collect_nisns() {
        let rows = vec![row(Some("2"), "a"), row(None, "b"), row(Some("1"), "c"), row(Some("2"), "d")];
        assert_eq!(collect_nisns(&rows), vec!["1".to_string(), "2".to_string()]);
    }
}
