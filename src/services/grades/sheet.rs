use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::collections::HashMap;

use super::GradeService;
use crate::errors::{ClassroomError, Result};
use crate::models::grades::{GradeRecord, GradeSheet, GradeSheetQuery, GradeSheetRow};
use crate::models::students::{Student, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::recap::aggregate::mean;
use crate::services::{current_teacher_id, error_response};
use crate::storage::Storage;
use crate::utils::validate::normalize_optional;

pub fn build_grade_sheet(
    query: GradeSheetQuery,
    students: Vec<Student>,
    records: Vec<GradeRecord>,
) -> GradeSheet {
    let mut by_student: HashMap<i64, GradeRecord> =
        records.into_iter().map(|r| (r.student_id, r)).collect();

    let rows: Vec<GradeSheetRow> = students
        .into_iter()
        .map(|student| {
            let record = by_student.remove(&student.id);
            GradeSheetRow {
                student,
                score: record.as_ref().map(|r| r.score),
                remarks: record.and_then(|r| r.remarks),
            }
        })
        .collect();

    GradeSheet {
        date: query.date,
        subject: query.subject,
        assessment_name: query.assessment_name.unwrap_or_default(),
        class: query.class,
        average: mean(rows.iter().filter_map(|row| row.score)),
        rows,
    }
}

/// 查询条件规范化后读取成绩表
pub async fn load_grade_sheet(
    storage: &dyn Storage,
    teacher_id: i64,
    mut query: GradeSheetQuery,
) -> Result<GradeSheet> {
    query.subject = query.subject.trim().to_string();
    if query.subject.is_empty() {
        return Err(ClassroomError::validation("Subject is required"));
    }
    query.class = normalize_optional(query.class);
    query.assessment_name = Some(normalize_optional(query.assessment_name).unwrap_or_default());

    let students = storage
        .list_students(
            teacher_id,
            StudentListQuery {
                search: None,
                class: query.class.clone(),
            },
        )
        .await?;
    let records = if students.is_empty() {
        Vec::new()
    } else {
        storage
            .list_grades_on(
                teacher_id,
                query.date,
                &query.subject,
                query.assessment_name.as_deref().unwrap_or_default(),
            )
            .await?
    };
    Ok(build_grade_sheet(query, students, records))
}

pub async fn get_sheet(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeSheetQuery,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_grade_sheet(storage.as_ref(), teacher_id, query).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sheet,
            "Grade sheet retrieved successfully",
        ))),
        Err(e @ ClassroomError::Validation(_)) => {
            Ok(error_response(&e, ErrorCode::GradeSubjectRequired))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::Gender;
    use chrono::Utc;

    fn student(id: i64) -> Student {
        Student {
            id,
            teacher_id: 1,
            nisn: None,
            name: format!("Student {id}"),
            class: "8B".into(),
            gender: Gender::Male,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn record(student_id: i64, score: f64) -> GradeRecord {
        GradeRecord {
            id: student_id,
            student_id,
            subject: "IPA".into(),
            assessment_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            assessment_name: "UH1".into(),
            score,
            remarks: None,
        }
    }

    #[test]
    fn test_build_grade_sheet_average_over_present_scores() {
        let query = GradeSheetQuery {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            subject: "IPA".into(),
            class: Some("8B".into()),
            assessment_name: Some("UH1".into()),
        };

        let sheet = build_grade_sheet(
            query,
            vec![student(1), student(2), student(3)],
            vec![record(1, 80.0), record(3, 0.0)],
        );

        assert_eq!(sheet.rows[0].score, Some(80.0));
        assert_eq!(sheet.rows[1].score, None);
        assert_eq!(sheet.rows[2].score, Some(0.0));
        assert_eq!(sheet.average, Some(40.0));
        assert_eq!(sheet.assessment_name, "UH1");
    }

    #[test]
    fn test_build_grade_sheet_without_scores() {
        let query = GradeSheetQuery {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            subject: "IPA".into(),
            class: None,
            assessment_name: None,
        };
        let sheet = build_grade_sheet(query, vec![student(1)], Vec::new());
        assert_eq!(sheet.average, None);
        assert_eq!(sheet.assessment_name, "");
    }
}
