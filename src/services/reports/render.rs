//! 报表 CSV 渲染：抬头（学校、教师、标题）+ 表格 + 汇总行

use crate::models::attendance::AttendanceSheet;
use crate::models::grades::GradeSheet;
use crate::models::recap::{AttendanceRecap, GradeRecap};

/// 报表抬头
#[derive(Debug, Clone)]
pub struct ReportHeading {
    pub school: String,
    pub teacher: String,
    pub title: String,
    /// 额外的 (标签, 值) 行，如班级、日期
    pub details: Vec<(String, String)>,
}

type CsvResult = Result<Vec<u8>, csv::Error>;

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new().flexible(true).from_writer(vec![])
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> CsvResult {
    wtr.into_inner().map_err(|e| e.into_error().into())
}

fn write_heading(wtr: &mut csv::Writer<Vec<u8>>, heading: &ReportHeading) -> csv::Result<()> {
    wtr.write_record(["School", heading.school.as_str()])?;
    wtr.write_record(["Teacher", heading.teacher.as_str()])?;
    wtr.write_record(["Report", heading.title.as_str()])?;
    for (label, value) in &heading.details {
        wtr.write_record([label.as_str(), value.as_str()])?;
    }
    Ok(())
}

/// 分数：整数不带小数，其余保留两位
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.2}")
    }
}

fn format_optional_score(score: Option<f64>) -> String {
    score.map(format_score).unwrap_or_default()
}

fn format_percentage(percentage: Option<u32>) -> String {
    percentage.map(|p| format!("{p}%")).unwrap_or_default()
}

pub fn attendance_sheet_csv(heading: &ReportHeading, sheet: &AttendanceSheet) -> CsvResult {
    let mut wtr = writer();
    write_heading(&mut wtr, heading)?;

    wtr.write_record(["No", "NISN", "Name", "Gender", "Status", "Notes"])?;
    for (index, row) in sheet.rows.iter().enumerate() {
        wtr.write_record([
            (index + 1).to_string(),
            row.student.nisn.clone().unwrap_or_default(),
            row.student.name.clone(),
            row.student.gender.to_string(),
            row.status.map(|s| s.to_string()).unwrap_or_default(),
            row.notes.clone().unwrap_or_default(),
        ])?;
    }

    let counts = &sheet.counts;
    wtr.write_record([
        "Summary".to_string(),
        format!("Hadir {}", counts.hadir),
        format!("Izin {}", counts.izin),
        format!("Sakit {}", counts.sakit),
        format!("Alpa {}", counts.alpa),
        format!("Filled {}/{}", sheet.filled, sheet.rows.len()),
    ])?;

    finish(wtr)
}

pub fn grade_sheet_csv(heading: &ReportHeading, sheet: &GradeSheet) -> CsvResult {
    let mut wtr = writer();
    write_heading(&mut wtr, heading)?;

    wtr.write_record(["No", "NISN", "Name", "Score", "Remarks"])?;
    for (index, row) in sheet.rows.iter().enumerate() {
        wtr.write_record([
            (index + 1).to_string(),
            row.student.nisn.clone().unwrap_or_default(),
            row.student.name.clone(),
            format_optional_score(row.score),
            row.remarks.clone().unwrap_or_default(),
        ])?;
    }
    wtr.write_record([
        "Average".to_string(),
        String::new(),
        String::new(),
        format_optional_score(sheet.average),
    ])?;

    finish(wtr)
}

pub fn attendance_recap_csv(heading: &ReportHeading, recap: &AttendanceRecap) -> CsvResult {
    let mut wtr = writer();
    write_heading(&mut wtr, heading)?;

    let mut header: Vec<String> = vec!["No".into(), "NISN".into(), "Name".into()];
    header.extend(recap.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    header.extend(["H", "I", "S", "A", "Total", "%"].map(String::from));
    wtr.write_record(&header)?;

    for (index, row) in recap.rows.iter().enumerate() {
        let mut record = vec![
            (index + 1).to_string(),
            row.student.nisn.clone().unwrap_or_default(),
            row.student.name.clone(),
        ];
        record.extend(
            row.days
                .iter()
                .map(|day| day.map(|s| s.short_code().to_string()).unwrap_or_default()),
        );
        record.extend([
            row.hadir.to_string(),
            row.izin.to_string(),
            row.sakit.to_string(),
            row.alpa.to_string(),
            row.total.to_string(),
            format_percentage(row.percentage),
        ]);
        wtr.write_record(&record)?;
    }

    let totals = &recap.totals;
    let mut footer = vec!["Total".to_string(), String::new(), String::new()];
    footer.extend(recap.dates.iter().map(|_| String::new()));
    footer.extend([
        totals.hadir.to_string(),
        totals.izin.to_string(),
        totals.sakit.to_string(),
        totals.alpa.to_string(),
        totals.total.to_string(),
        format_percentage(totals.percentage),
    ]);
    wtr.write_record(&footer)?;

    finish(wtr)
}

pub fn grade_recap_csv(heading: &ReportHeading, recap: &GradeRecap) -> CsvResult {
    let mut wtr = writer();
    write_heading(&mut wtr, heading)?;

    let mut header: Vec<String> = vec!["No".into(), "NISN".into(), "Name".into()];
    header.extend(recap.columns.iter().map(|c| {
        let date = c.date.format("%Y-%m-%d");
        if c.name.is_empty() {
            date.to_string()
        } else {
            format!("{} ({date})", c.name)
        }
    }));
    header.extend(["Average", "Grade"].map(String::from));
    wtr.write_record(&header)?;

    for (index, row) in recap.rows.iter().enumerate() {
        let mut record = vec![
            (index + 1).to_string(),
            row.student.nisn.clone().unwrap_or_default(),
            row.student.name.clone(),
        ];
        record.extend(row.cells.iter().map(|cell| format_optional_score(*cell)));
        record.push(format_optional_score(row.average));
        record.push(row.letter.map(|l| l.as_str().to_string()).unwrap_or_default());
        wtr.write_record(&record)?;
    }

    let mut footer = vec!["Class average".to_string(), String::new(), String::new()];
    footer.extend(recap.column_averages.iter().map(|avg| format_optional_score(*avg)));
    footer.push(format_optional_score(recap.class_average));
    wtr.write_record(&footer)?;

    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::models::grades::GradeRecord;
    use crate::models::students::{Gender, Student};
    use crate::services::recap::aggregate::{aggregate_attendance, aggregate_grades};
    use chrono::{NaiveDate, Utc};

    fn heading(title: &str) -> ReportHeading {
        ReportHeading {
            school: "SMP Negeri 1".into(),
            teacher: "Bu Rina".into(),
            title: title.into(),
            details: vec![("Class".into(), "7A".into())],
        }
    }

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            teacher_id: 1,
            nisn: Some(format!("00{id}")),
            name: name.into(),
            class: "7A".into(),
            gender: Gender::Female,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn lines(data: Vec<u8>) -> Vec<String> {
        String::from_utf8(data)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(90.0), "90");
        assert_eq!(format_score(72.5), "72.50");
        assert_eq!(format_optional_score(None), "");
    }

    #[test]
    fn test_attendance_recap_csv() {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let recap = aggregate_attendance(
            &[student(1, "Ani"), student(2, "Budi")],
            &[AttendanceRecord {
                id: 1,
                student_id: 1,
                date: d1,
                status: AttendanceStatus::Present,
                notes: None,
            }],
        );

        let lines = lines(attendance_recap_csv(&heading("Attendance recap"), &recap).unwrap());

        assert_eq!(lines[0], "School,SMP Negeri 1");
        assert_eq!(lines[1], "Teacher,Bu Rina");
        assert_eq!(lines[3], "Class,7A");
        assert_eq!(lines[4], "No,NISN,Name,2024-01-01,H,I,S,A,Total,%");
        assert_eq!(lines[5], "1,001,Ani,H,1,0,0,0,1,100%");
        assert_eq!(lines[6], "2,002,Budi,,0,0,0,0,0,");
        assert_eq!(lines[7], "Total,,,,1,0,0,0,1,100%");
    }

    #[test]
    fn test_grade_recap_csv() {
        let record = |student_id, day, name: &str, score| GradeRecord {
            id: 0,
            student_id,
            subject: "IPA".into(),
            assessment_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            assessment_name: name.into(),
            score,
            remarks: None,
        };
        let recap = aggregate_grades(
            &[student(1, "Ani")],
            &[record(1, 1, "UH1", 90.0), record(1, 8, "", 60.0)],
        );

        let lines = lines(grade_recap_csv(&heading("Grade recap"), &recap).unwrap());

        assert_eq!(lines[4], "No,NISN,Name,UH1 (2024-01-01),2024-01-08,Average,Grade");
        assert_eq!(lines[5], "1,001,Ani,90,60,75,B");
        assert_eq!(lines[6], "Class average,,,90,60,75");
    }
}
