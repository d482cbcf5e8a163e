use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::collections::HashMap;

use super::AttendanceService;
use crate::errors::Result;
use crate::models::attendance::{
    AttendanceRecord, AttendanceSheet, AttendanceSheetQuery, AttendanceSheetRow, StatusCounts,
};
use crate::models::students::{Student, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};
use crate::storage::Storage;
use crate::utils::validate::normalize_optional;

/// 把当天的考勤记录挂到花名册上
pub fn build_attendance_sheet(
    date: NaiveDate,
    class: Option<String>,
    students: Vec<Student>,
    records: Vec<AttendanceRecord>,
) -> AttendanceSheet {
    let mut by_student: HashMap<i64, AttendanceRecord> =
        records.into_iter().map(|r| (r.student_id, r)).collect();

    let mut counts = StatusCounts::default();
    let rows: Vec<AttendanceSheetRow> = students
        .into_iter()
        .map(|student| {
            let record = by_student.remove(&student.id);
            if let Some(record) = &record {
                counts.record(record.status);
            }
            AttendanceSheetRow {
                student,
                status: record.as_ref().map(|r| r.status),
                notes: record.and_then(|r| r.notes),
            }
        })
        .collect();

    AttendanceSheet {
        date,
        class,
        filled: counts.total(),
        rows,
        counts,
    }
}

pub async fn load_attendance_sheet(
    storage: &dyn Storage,
    teacher_id: i64,
    date: NaiveDate,
    class: Option<String>,
) -> Result<AttendanceSheet> {
    let class = normalize_optional(class);
    let students = storage
        .list_students(
            teacher_id,
            StudentListQuery {
                search: None,
                class: class.clone(),
            },
        )
        .await?;
    let records = if students.is_empty() {
        Vec::new()
    } else {
        storage.list_attendance_on(teacher_id, date).await?
    };
    Ok(build_attendance_sheet(date, class, students, records))
}

pub async fn get_sheet(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceSheetQuery,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_attendance_sheet(storage.as_ref(), teacher_id, query.date, query.class).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sheet,
            "Attendance sheet retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;
    use crate::models::students::Gender;
    use chrono::Utc;

    fn student(id: i64) -> Student {
        Student {
            id,
            teacher_id: 1,
            nisn: None,
            name: format!("Student {id}"),
            class: "7A".into(),
            gender: Gender::Female,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_attendance_sheet() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            AttendanceRecord {
                id: 1,
                student_id: 2,
                date,
                status: AttendanceStatus::Sick,
                notes: Some("Demam".into()),
            },
            AttendanceRecord {
                id: 2,
                student_id: 3,
                date,
                status: AttendanceStatus::Present,
                notes: None,
            },
        ];

        let sheet = build_attendance_sheet(
            date,
            Some("7A".into()),
            vec![student(1), student(2), student(3)],
            records,
        );

        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[0].status, None);
        assert_eq!(sheet.rows[1].status, Some(AttendanceStatus::Sick));
        assert_eq!(sheet.rows[1].notes.as_deref(), Some("Demam"));
        assert_eq!(sheet.counts.sakit, 1);
        assert_eq!(sheet.counts.hadir, 1);
        assert_eq!(sheet.filled, 2);
    }

    #[test]
    fn test_sheet_ignores_records_outside_roster() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![AttendanceRecord {
            id: 1,
            student_id: 99,
            date,
            status: AttendanceStatus::Absent,
            notes: None,
        }];
        let sheet = build_attendance_sheet(date, None, vec![student(1)], records);
        assert_eq!(sheet.filled, 0);
        assert_eq!(sheet.counts.alpa, 0);
    }
}
