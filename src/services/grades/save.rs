use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::{info, warn};

use super::GradeService;
use crate::models::grades::{GradeEntryInput, SaveGradesRequest, SaveGradesResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};
use crate::utils::validate::{normalize_optional, validate_score};

/// 校验分数并去重，同一学生保留最后一条
pub(crate) fn prepare_entries(
    entries: Vec<GradeEntryInput>,
) -> Result<Vec<GradeEntryInput>, String> {
    let mut position: HashMap<i64, usize> = HashMap::new();
    let mut result: Vec<GradeEntryInput> = Vec::with_capacity(entries.len());
    for mut entry in entries {
        validate_score(entry.score)
            .map_err(|msg| format!("{msg} (student {})", entry.student_id))?;
        entry.remarks = normalize_optional(entry.remarks);
        match position.get(&entry.student_id) {
            Some(&index) => result[index] = entry,
            None => {
                position.insert(entry.student_id, result.len());
                result.push(entry);
            }
        }
    }
    Ok(result)
}

pub async fn save_grades(
    service: &GradeService,
    save_request: SaveGradesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    let subject = save_request.subject.trim().to_string();
    if subject.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeSubjectRequired,
            "Subject is required",
        )));
    }
    let assessment_name = normalize_optional(save_request.assessment_name).unwrap_or_default();

    let entries = match prepare_entries(save_request.records) {
        Ok(entries) => entries,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::GradeScoreInvalid, msg)));
        }
    };
    if entries.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            SaveGradesResponse { saved: 0 },
            "Nothing to save",
        )));
    }

    let storage = service.get_storage(request);

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    let owned = match storage.filter_owned_student_ids(teacher_id, &student_ids).await {
        Ok(owned) => owned,
        Err(e) => return Ok(error_response(&e, ErrorCode::GradeSaveFailed)),
    };
    if let Some(foreign) = student_ids.iter().find(|id| !owned.contains(*id)) {
        warn!("Teacher {} tried to write grades for student {}", teacher_id, foreign);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::StudentNotOwned,
            format!("Student {foreign} does not belong to you"),
        )));
    }

    match storage
        .upsert_grades(save_request.date, &subject, &assessment_name, entries)
        .await
    {
        Ok(saved) => {
            info!(
                "Teacher {} saved {} grades for {} on {}",
                teacher_id, saved, subject, save_request.date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SaveGradesResponse { saved },
                "Grades saved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::GradeSaveFailed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(student_id: i64, score: f64) -> GradeEntryInput {
        GradeEntryInput {
            student_id,
            score,
            remarks: None,
        }
    }

    #[test]
    fn test_prepare_entries_rejects_out_of_range() {
        assert!(prepare_entries(vec![entry(1, 100.0), entry(2, 0.0)]).is_ok());
        assert!(prepare_entries(vec![entry(1, 100.5)]).is_err());
        assert!(prepare_entries(vec![entry(1, -1.0)]).is_err());
        assert!(prepare_entries(vec![entry(1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_prepare_entries_last_write_wins() {
        let result = prepare_entries(vec![entry(1, 70.0), entry(2, 80.0), entry(1, 75.0)]).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].score, 75.0);
    }
}
