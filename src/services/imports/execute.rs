//! 导入执行：插入分批、更新逐条，失败只计数不中断

use tracing::{debug, warn};

use crate::models::imports::{ImportTally, ReconciledRows};
use crate::storage::RosterWriter;

// 插入阶段占 70%，更新阶段占 30%
const INSERT_SHARE: f64 = 70.0;
const UPDATE_SHARE: f64 = 30.0;

/// 进度计算
#[derive(Debug, Clone, Copy)]
struct ProgressMeter {
    batches_total: usize,
    updates_total: usize,
}

impl ProgressMeter {
    fn percent(&self, batches_done: usize, updates_done: usize) -> u8 {
        let insert_phase_done = batches_done >= self.batches_total;
        let insert_ratio = if self.batches_total == 0 {
            1.0
        } else {
            batches_done as f64 / self.batches_total as f64
        };
        let update_ratio = match self.updates_total {
            0 if insert_phase_done => 1.0,
            0 => 0.0,
            total => updates_done as f64 / total as f64,
        };

        let percent = INSERT_SHARE * insert_ratio + UPDATE_SHARE * update_ratio;
        percent.round().clamp(0.0, 100.0) as u8
    }
}

/// 顺序执行导入计划
///
/// 每完成一步都会把当前累计值交给 `on_progress`，进度单调不减。
/// 没有跨步骤事务：已写入的行在后续失败时保留。
pub async fn execute_import<W, F>(
    writer: &W,
    teacher_id: i64,
    rows: ReconciledRows,
    batch_size: usize,
    mut on_progress: F,
) -> ImportTally
where
    W: RosterWriter + ?Sized,
    F: FnMut(ImportTally),
{
    let batch_size = batch_size.max(1);
    let ReconciledRows {
        to_insert,
        to_update,
    } = rows;

    let meter = ProgressMeter {
        batches_total: to_insert.len().div_ceil(batch_size),
        updates_total: to_update.len(),
    };
    let mut tally = ImportTally::default();

    for (index, batch) in to_insert.chunks(batch_size).enumerate() {
        let students = batch.iter().map(|row| row.to_new_student()).collect();
        match writer.insert_students(teacher_id, students).await {
            Ok(count) => tally.inserted += count,
            Err(e) => {
                warn!(
                    "Import batch {} ({} rows) failed for teacher {}: {}",
                    index + 1,
                    batch.len(),
                    teacher_id,
                    e
                );
                tally.failed += 1;
            }
        }
        tally.progress = meter.percent(index + 1, 0);
        on_progress(tally);
    }

    for (index, (student_id, row)) in to_update.iter().enumerate() {
        match writer
            .update_student_fields(teacher_id, *student_id, row.to_fields())
            .await
        {
            Ok(true) => tally.updated += 1,
            Ok(false) => {
                warn!("Import update skipped, student {} no longer exists", student_id);
                tally.failed += 1;
            }
            Err(e) => {
                warn!("Import update of student {} failed: {}", student_id, e);
                tally.failed += 1;
            }
        }
        tally.progress = meter.percent(meter.batches_total, index + 1);
        on_progress(tally);
    }

    tally.progress = 100;
    debug!(
        "Import for teacher {} finished: {} inserted, {} updated, {} failed",
        teacher_id, tally.inserted, tally.updated, tally.failed
    );
    on_progress(tally);
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::errors::{ClassroomError, Result};
    use crate::models::imports::ValidRow;
    use crate::models::students::{Gender, NewStudent, StudentFields};
    use crate::services::imports::reconcile::reconcile;

    /// 内存花名册，可指定失败的批次
    #[derive(Default)]
    struct MemoryRoster {
        next_id: Mutex<i64>,
        students: Mutex<HashMap<i64, NewStudent>>,
        failing_batches: Vec<usize>,
        batch_calls: Mutex<usize>,
    }

    impl MemoryRoster {
        fn nisn_map(&self) -> HashMap<String, i64> {
            self.students
                .lock()
                .unwrap()
                .iter()
                .filter_map(|(id, s)| s.nisn.clone().map(|n| (n, *id)))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl RosterWriter for MemoryRoster {
        async fn insert_students(&self, _teacher_id: i64, students: Vec<NewStudent>) -> Result<u64> {
            let call = {
                let mut calls = self.batch_calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if self.failing_batches.contains(&call) {
                return Err(ClassroomError::database_operation("connection reset"));
            }
            let count = students.len() as u64;
            let mut next_id = self.next_id.lock().unwrap();
            let mut map = self.students.lock().unwrap();
            for student in students {
                *next_id += 1;
                map.insert(*next_id, student);
            }
            Ok(count)
        }

        async fn update_student_fields(
            &self,
            _teacher_id: i64,
            student_id: i64,
            fields: StudentFields,
        ) -> Result<bool> {
            let mut map = self.students.lock().unwrap();
            match map.get_mut(&student_id) {
                Some(student) => {
                    student.name = fields.name;
                    student.class = fields.class;
                    student.gender = fields.gender;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn rows(count: usize) -> Vec<ValidRow> {
        (0..count)
            .map(|i| ValidRow {
                nisn: Some(format!("{:010}", i)),
                name: format!("Student {i}"),
                class: "7A".into(),
                gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
            })
            .collect()
    }

    #[tokio::test]
    async fn test_fully_successful_import() {
        let roster = MemoryRoster::default();
        let plan = reconcile(rows(120), &roster.nisn_map());

        let tally = execute_import(&roster, 1, plan, 50, |_| {}).await;

        assert_eq!(tally.inserted, 120);
        assert_eq!(tally.updated, 0);
        assert_eq!(tally.failed, 0);
        assert_eq!(tally.progress, 100);
        assert_eq!(*roster.batch_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_second_run_only_updates() {
        let roster = MemoryRoster::default();
        execute_import(&roster, 1, reconcile(rows(10), &roster.nisn_map()), 50, |_| {}).await;

        let second = reconcile(rows(10), &roster.nisn_map());
        assert!(second.to_insert.is_empty());
        let tally = execute_import(&roster, 1, second, 50, |_| {}).await;

        assert_eq!(tally.inserted, 0);
        assert_eq!(tally.updated, 10);
        assert_eq!(tally.failed, 0);
        assert_eq!(roster.students.lock().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_failed_batch_counts_once_and_continues() {
        let roster = MemoryRoster {
            failing_batches: vec![2],
            ..Default::default()
        };
        let plan = reconcile(rows(120), &roster.nisn_map());

        let tally = execute_import(&roster, 1, plan, 50, |_| {}).await;

        assert_eq!(tally.inserted, 70);
        assert_eq!(tally.failed, 1);
        assert!(tally.inserted + tally.updated + tally.failed <= 120);
    }

    #[tokio::test]
    async fn test_missing_update_target_counts_as_failed() {
        let roster = MemoryRoster::default();
        let mut plan = reconcile(rows(1), &HashMap::new());
        let row = plan.to_insert.remove(0);
        plan.to_update.push((404, row));

        let tally = execute_import(&roster, 1, plan, 50, |_| {}).await;

        assert_eq!(tally.updated, 0);
        assert_eq!(tally.failed, 1);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic() {
        let roster = MemoryRoster::default();
        execute_import(&roster, 1, reconcile(rows(4), &roster.nisn_map()), 50, |_| {}).await;

        // 4 行待更新 + 101 行待插入
        let mut all = rows(105);
        all.rotate_left(4);
        let plan = reconcile(all, &roster.nisn_map());
        assert_eq!(plan.to_insert.len(), 101);
        assert_eq!(plan.to_update.len(), 4);

        let mut seen = Vec::new();
        execute_import(&roster, 1, plan, 50, |t| seen.push(t.progress)).await;

        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        // 3 批插入之后插入阶段满 70%
        assert_eq!(seen[2], 70);
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[test]
    fn test_progress_empty_phases() {
        let meter = ProgressMeter {
            batches_total: 0,
            updates_total: 2,
        };
        assert_eq!(meter.percent(0, 0), 70);
        assert_eq!(meter.percent(0, 1), 85);

        let meter = ProgressMeter {
            batches_total: 2,
            updates_total: 0,
        };
        assert_eq!(meter.percent(1, 0), 35);
        assert_eq!(meter.percent(2, 0), 100);
    }
}
