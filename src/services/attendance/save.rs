use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::{info, warn};

use super::AttendanceService;
use crate::models::attendance::{AttendanceEntryInput, SaveAttendanceRequest, SaveAttendanceResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};
use crate::utils::validate::normalize_optional;

/// 同一学生重复提交时保留最后一条
pub(crate) fn dedupe_entries(entries: Vec<AttendanceEntryInput>) -> Vec<AttendanceEntryInput> {
    let mut position: HashMap<i64, usize> = HashMap::new();
    let mut result: Vec<AttendanceEntryInput> = Vec::with_capacity(entries.len());
    for mut entry in entries {
        entry.notes = normalize_optional(entry.notes);
        match position.get(&entry.student_id) {
            Some(&index) => result[index] = entry,
            None => {
                position.insert(entry.student_id, result.len());
                result.push(entry);
            }
        }
    }
    result
}

pub async fn save_attendance(
    service: &AttendanceService,
    save_request: SaveAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    let entries = dedupe_entries(save_request.records);
    if entries.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            SaveAttendanceResponse { saved: 0 },
            "Nothing to save",
        )));
    }

    let storage = service.get_storage(request);

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    let owned = match storage.filter_owned_student_ids(teacher_id, &student_ids).await {
        Ok(owned) => owned,
        Err(e) => return Ok(error_response(&e, ErrorCode::AttendanceSaveFailed)),
    };
    if let Some(foreign) = student_ids.iter().find(|id| !owned.contains(*id)) {
        warn!(
            "Teacher {} tried to write attendance for student {}",
            teacher_id, foreign
        );
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::StudentNotOwned,
            format!("Student {foreign} does not belong to you"),
        )));
    }

    match storage.upsert_attendance(save_request.date, entries).await {
        Ok(saved) => {
            info!(
                "Teacher {} saved {} attendance rows for {}",
                teacher_id, saved, save_request.date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SaveAttendanceResponse { saved },
                "Attendance saved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::AttendanceSaveFailed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;

    fn entry(student_id: i64, status: AttendanceStatus, notes: Option<&str>) -> AttendanceEntryInput {
        AttendanceEntryInput {
            student_id,
            status,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_dedupe_keeps_last_entry_in_first_position() {
        let entries = vec![
            entry(1, AttendanceStatus::Present, None),
            entry(2, AttendanceStatus::Sick, Some(" ")),
            entry(1, AttendanceStatus::Absent, Some(" bolos ")),
        ];

        let result = dedupe_entries(entries);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].student_id, 1);
        assert_eq!(result[0].status, AttendanceStatus::Absent);
        assert_eq!(result[0].notes.as_deref(), Some("bolos"));
        assert_eq!(result[1].notes, None);
    }
}
