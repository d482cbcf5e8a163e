//! 汇总聚合：把按日期的扁平记录转成学生 x 日期/评估的透视表

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::attendance::{AttendanceRecord, AttendanceStatus, StatusCounts};
use crate::models::grades::GradeRecord;
use crate::models::recap::{
    AttendanceRecap, AttendanceRecapRow, AttendanceTotals, GradeColumn, GradeRecap,
    GradeRecapRow, LetterGrade,
};
use crate::models::students::Student;

/// 出勤率，total 为 0 时无值
pub fn attendance_percentage(hadir: u32, total: u32) -> Option<u32> {
    (total > 0).then(|| (f64::from(hadir) / f64::from(total) * 100.0).round() as u32)
}

/// 算术平均，空集无值
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// 考勤汇总
///
/// 学生按传入顺序输出，没有记录的学生也保留（total = 0）。
/// 不属于传入学生的记录被忽略。
pub fn aggregate_attendance(students: &[Student], records: &[AttendanceRecord]) -> AttendanceRecap {
    let in_scope: HashSet<i64> = students.iter().map(|s| s.id).collect();
    let records: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| in_scope.contains(&r.student_id))
        .collect();

    let dates: Vec<_> = records
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let lookup: HashMap<(i64, chrono::NaiveDate), AttendanceStatus> = records
        .iter()
        .map(|r| ((r.student_id, r.date), r.status))
        .collect();

    let mut overall = StatusCounts::default();
    let rows = students
        .iter()
        .map(|student| {
            let days: Vec<Option<AttendanceStatus>> = dates
                .iter()
                .map(|date| lookup.get(&(student.id, *date)).copied())
                .collect();

            let mut counts = StatusCounts::default();
            days.iter().flatten().for_each(|status| counts.record(*status));
            overall.absorb(&counts);

            let total = counts.total();
            AttendanceRecapRow {
                student: student.clone(),
                hadir: counts.hadir,
                izin: counts.izin,
                sakit: counts.sakit,
                alpa: counts.alpa,
                total,
                percentage: attendance_percentage(counts.hadir, total),
                days,
            }
        })
        .collect();

    let total = overall.total();
    AttendanceRecap {
        dates,
        rows,
        totals: AttendanceTotals {
            hadir: overall.hadir,
            izin: overall.izin,
            sakit: overall.sakit,
            alpa: overall.alpa,
            total,
            percentage: attendance_percentage(overall.hadir, total),
        },
    }
}

/// 成绩汇总
///
/// 列为 (日期, 评估名) 去重后按日期升序的首次出现顺序；
/// 同一单元格的重复记录后写覆盖先写。
pub fn aggregate_grades(students: &[Student], records: &[GradeRecord]) -> GradeRecap {
    let in_scope: HashSet<i64> = students.iter().map(|s| s.id).collect();
    let mut records: Vec<&GradeRecord> = records
        .iter()
        .filter(|r| in_scope.contains(&r.student_id))
        .collect();
    // 稳定排序，同日记录保持输入顺序
    records.sort_by_key(|r| r.assessment_date);

    let mut columns: Vec<GradeColumn> = Vec::new();
    let mut column_index: HashMap<GradeColumn, usize> = HashMap::new();
    let mut cells: HashMap<(i64, usize), f64> = HashMap::new();

    for record in records {
        let key = GradeColumn {
            date: record.assessment_date,
            name: record.assessment_name.clone(),
        };
        let index = *column_index.entry(key.clone()).or_insert_with(|| {
            columns.push(key);
            columns.len() - 1
        });
        cells.insert((record.student_id, index), record.score);
    }

    let rows: Vec<GradeRecapRow> = students
        .iter()
        .map(|student| {
            let row_cells: Vec<Option<f64>> = (0..columns.len())
                .map(|index| cells.get(&(student.id, index)).copied())
                .collect();
            let average = mean(row_cells.iter().flatten().copied());
            GradeRecapRow {
                student: student.clone(),
                cells: row_cells,
                average,
                letter: average.map(LetterGrade::from_average),
            }
        })
        .collect();

    let column_averages = (0..columns.len())
        .map(|index| mean(rows.iter().filter_map(|row| row.cells[index])))
        .collect();
    let class_average = mean(rows.iter().filter_map(|row| row.average));

    GradeRecap {
        columns,
        rows,
        column_averages,
        class_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::Gender;
    use chrono::{NaiveDate, Utc};

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            teacher_id: 1,
            nisn: None,
            name: name.into(),
            class: "7A".into(),
            gender: Gender::Male,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn attendance(student_id: i64, day: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            student_id,
            date: date(day),
            status,
            notes: None,
        }
    }

    fn grade(student_id: i64, day: &str, name: &str, score: f64) -> GradeRecord {
        GradeRecord {
            id: 0,
            student_id,
            subject: "Matematika".into(),
            assessment_date: date(day),
            assessment_name: name.into(),
            score,
            remarks: None,
        }
    }

    #[test]
    fn test_attendance_example() {
        let students = vec![student(1, "S1"), student(2, "S2")];
        let records = vec![
            attendance(1, "2024-01-01", AttendanceStatus::Present),
            attendance(1, "2024-01-02", AttendanceStatus::Absent),
            attendance(2, "2024-01-01", AttendanceStatus::Permitted),
        ];

        let recap = aggregate_attendance(&students, &records);

        assert_eq!(recap.dates, vec![date("2024-01-01"), date("2024-01-02")]);
        let s1 = &recap.rows[0];
        assert_eq!((s1.hadir, s1.alpa, s1.total, s1.percentage), (1, 1, 2, Some(50)));
        assert_eq!(
            s1.days,
            vec![Some(AttendanceStatus::Present), Some(AttendanceStatus::Absent)]
        );
        let s2 = &recap.rows[1];
        assert_eq!((s2.izin, s2.total, s2.percentage), (1, 1, Some(0)));
        assert_eq!(s2.days, vec![Some(AttendanceStatus::Permitted), None]);
        assert_eq!(recap.totals.total, 3);
        assert_eq!(recap.totals.percentage, Some(33));
    }

    #[test]
    fn test_attendance_counts_sum_to_total() {
        let students = vec![student(1, "A"), student(2, "B"), student(3, "C")];
        let records = vec![
            attendance(2, "2024-02-03", AttendanceStatus::Sick),
            attendance(1, "2024-02-01", AttendanceStatus::Present),
            attendance(2, "2024-02-01", AttendanceStatus::Present),
            attendance(9, "2024-02-09", AttendanceStatus::Absent),
        ];

        let recap = aggregate_attendance(&students, &records);

        // 范围外学生的日期不出现
        assert_eq!(recap.dates, vec![date("2024-02-01"), date("2024-02-03")]);
        for row in &recap.rows {
            assert_eq!(row.hadir + row.izin + row.sakit + row.alpa, row.total);
            assert_eq!(row.percentage.is_some(), row.total > 0);
        }
        let c = &recap.rows[2];
        assert_eq!(c.total, 0);
        assert_eq!(c.percentage, None);
        assert_eq!(c.days, vec![None, None]);
    }

    #[test]
    fn test_attendance_keeps_student_order() {
        let students = vec![student(5, "Zed"), student(3, "Amy")];
        let recap = aggregate_attendance(&students, &[]);
        let ids: Vec<i64> = recap.rows.iter().map(|r| r.student.id).collect();
        assert_eq!(ids, vec![5, 3]);
        assert!(recap.dates.is_empty());
        assert_eq!(recap.totals.percentage, None);
    }

    #[test]
    fn test_grade_example() {
        let students = vec![student(1, "S1")];
        let records = vec![
            grade(1, "2024-01-01", "UH1", 90.0),
            grade(1, "2024-01-08", "UH2", 60.0),
        ];

        let recap = aggregate_grades(&students, &records);

        assert_eq!(
            recap.columns,
            vec![
                GradeColumn {
                    date: date("2024-01-01"),
                    name: "UH1".into()
                },
                GradeColumn {
                    date: date("2024-01-08"),
                    name: "UH2".into()
                },
            ]
        );
        assert_eq!(recap.rows[0].average, Some(75.0));
        assert_eq!(recap.rows[0].letter, Some(LetterGrade::B));
        assert_eq!(recap.class_average, Some(75.0));
    }

    #[test]
    fn test_grade_average_ignores_missing_cells() {
        let students = vec![student(1, "A"), student(2, "B"), student(3, "C")];
        let records = vec![
            grade(1, "2024-03-01", "Quiz", 80.0),
            grade(2, "2024-03-01", "Quiz", 0.0),
            grade(1, "2024-03-05", "UTS", 100.0),
        ];

        let recap = aggregate_grades(&students, &records);

        assert_eq!(recap.rows[0].average, Some(90.0));
        assert_eq!(recap.rows[0].letter, Some(LetterGrade::A));
        // 0 分与无成绩不同
        assert_eq!(recap.rows[1].cells, vec![Some(0.0), None]);
        assert_eq!(recap.rows[1].average, Some(0.0));
        assert_eq!(recap.rows[1].letter, Some(LetterGrade::D));
        assert_eq!(recap.rows[2].average, None);
        assert_eq!(recap.rows[2].letter, None);
        assert_eq!(recap.column_averages, vec![Some(40.0), Some(100.0)]);
        assert_eq!(recap.class_average, Some(45.0));
    }

    #[test]
    fn test_grade_columns_same_day_and_last_write_wins() {
        let students = vec![student(1, "A")];
        let records = vec![
            grade(1, "2024-04-02", "UH2", 70.0),
            grade(1, "2024-04-01", "UH1", 65.0),
            grade(1, "2024-04-02", "Tugas", 88.0),
            grade(1, "2024-04-02", "UH2", 72.0),
        ];

        let recap = aggregate_grades(&students, &records);

        let names: Vec<&str> = recap.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["UH1", "UH2", "Tugas"]);
        assert_eq!(recap.rows[0].cells, vec![Some(65.0), Some(72.0), Some(88.0)]);
    }

    #[test]
    fn test_letter_thresholds() {
        assert_eq!(LetterGrade::from_average(85.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_average(84.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_average(70.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_average(60.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_average(59.9), LetterGrade::D);
    }
}
