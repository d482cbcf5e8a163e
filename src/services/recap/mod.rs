//! 考勤与成绩汇总

pub mod aggregate;
pub mod slots;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{ClassroomError, Result};
use crate::models::recap::{
    AttendanceRecap, AttendanceRecapQuery, GradeRecap, GradeRecapQuery, LoadSlotResponse,
    LoadState, RecapKind, RecapResponse,
};
use crate::models::students::{Student, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{normalize_optional, parse_month};

use self::slots::LoadSlots;

/// 解析考勤汇总的日期区间 [start, end)
pub fn resolve_range(query: &AttendanceRecapQuery) -> Result<(NaiveDate, NaiveDate)> {
    if let Some(month) = query.month.as_deref().filter(|m| !m.trim().is_empty()) {
        return parse_month(month).map_err(ClassroomError::validation);
    }
    match (query.start, query.end) {
        (Some(start), Some(end)) if start < end => Ok((start, end)),
        (Some(_), Some(_)) => Err(ClassroomError::validation("end must be after start")),
        _ => Err(ClassroomError::validation(
            "Either month or both start and end are required",
        )),
    }
}

async fn roster(storage: &dyn Storage, teacher_id: i64, class: Option<String>) -> Result<Vec<Student>> {
    storage
        .list_students(
            teacher_id,
            StudentListQuery {
                search: None,
                class: normalize_optional(class),
            },
        )
        .await
}

/// 读取并聚合考勤汇总
pub async fn load_attendance_recap(
    storage: &dyn Storage,
    teacher_id: i64,
    class: Option<String>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<AttendanceRecap> {
    let students = roster(storage, teacher_id, class).await?;
    if students.is_empty() {
        return Ok(aggregate::aggregate_attendance(&students, &[]));
    }
    let records = storage
        .list_attendance_between(teacher_id, start, end)
        .await?;
    Ok(aggregate::aggregate_attendance(&students, &records))
}

/// 读取并聚合成绩汇总
pub async fn load_grade_recap(
    storage: &dyn Storage,
    teacher_id: i64,
    subject: &str,
    class: Option<String>,
) -> Result<GradeRecap> {
    let students = roster(storage, teacher_id, class).await?;
    if students.is_empty() {
        return Ok(aggregate::aggregate_grades(&students, &[]));
    }
    let records = storage.list_grades_for_subject(teacher_id, subject).await?;
    Ok(aggregate::aggregate_grades(&students, &records))
}

fn attendance_has_data(recap: &AttendanceRecap) -> bool {
    !recap.rows.is_empty() && !recap.dates.is_empty()
}

fn grades_have_data(recap: &GradeRecap) -> bool {
    !recap.rows.is_empty() && !recap.columns.is_empty()
}

pub struct RecapService {
    storage: Option<Arc<dyn Storage>>,
    attendance_slots: LoadSlots<AttendanceRecap>,
    grade_slots: LoadSlots<GradeRecap>,
}

impl RecapService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            attendance_slots: LoadSlots::new(),
            grade_slots: LoadSlots::new(),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 考勤汇总
    pub async fn attendance(
        &self,
        query: AttendanceRecapQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let (start, end) = match resolve_range(&query) {
            Ok(range) => range,
            Err(e) => return Ok(super::error_response(&e, ErrorCode::RecapFilterInvalid)),
        };

        let token = self.attendance_slots.begin(teacher_id);
        let storage = self.get_storage(request);

        match load_attendance_recap(storage.as_ref(), teacher_id, query.class, start, end).await {
            Ok(recap) => {
                let recap = attendance_has_data(&recap).then_some(recap);
                let applied = self
                    .attendance_slots
                    .complete(teacher_id, token, recap.clone());
                if !applied {
                    debug!("Attendance recap {} for teacher {} superseded", token, teacher_id);
                }
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    Self::recap_response(token, applied, recap),
                    "Attendance recap retrieved",
                )))
            }
            Err(e) => {
                self.attendance_slots.abandon(teacher_id, token);
                Ok(super::error_response(&e, ErrorCode::InternalServerError))
            }
        }
    }

    // 成绩汇总
    pub async fn grades(
        &self,
        query: GradeRecapQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let subject = query.subject.trim().to_string();
        if subject.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RecapFilterInvalid,
                "Subject is required",
            )));
        }

        let token = self.grade_slots.begin(teacher_id);
        let storage = self.get_storage(request);

        match load_grade_recap(storage.as_ref(), teacher_id, &subject, query.class).await {
            Ok(recap) => {
                let recap = grades_have_data(&recap).then_some(recap);
                let applied = self.grade_slots.complete(teacher_id, token, recap.clone());
                if !applied {
                    debug!("Grade recap {} for teacher {} superseded", token, teacher_id);
                }
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    Self::recap_response(token, applied, recap),
                    "Grade recap retrieved",
                )))
            }
            Err(e) => {
                self.grade_slots.abandon(teacher_id, token);
                Ok(super::error_response(&e, ErrorCode::InternalServerError))
            }
        }
    }

    // 槽位当前状态
    pub async fn latest(&self, kind: RecapKind, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let response = match kind {
            RecapKind::Attendance => {
                let slot = self.attendance_slots.snapshot(teacher_id);
                HttpResponse::Ok().json(ApiResponse::success(
                    LoadSlotResponse {
                        token: slot.token,
                        state: slot.state,
                        recap: slot.value,
                    },
                    "Attendance recap slot retrieved",
                ))
            }
            RecapKind::Grades => {
                let slot = self.grade_slots.snapshot(teacher_id);
                HttpResponse::Ok().json(ApiResponse::success(
                    LoadSlotResponse {
                        token: slot.token,
                        state: slot.state,
                        recap: slot.value,
                    },
                    "Grade recap slot retrieved",
                ))
            }
        };
        Ok(response)
    }

    fn recap_response<T: ts_rs::TS>(token: u64, applied: bool, recap: Option<T>) -> RecapResponse<T> {
        RecapResponse {
            token,
            superseded: !applied,
            state: if recap.is_some() {
                LoadState::Ready
            } else {
                LoadState::Empty
            },
            recap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_resolve_range_month() {
        let query = AttendanceRecapQuery {
            month: Some("2024-12".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_range(&query).unwrap(),
            (date("2024-12-01"), date("2025-01-01"))
        );
    }

    #[test]
    fn test_resolve_range_explicit() {
        let query = AttendanceRecapQuery {
            start: Some(date("2024-01-01")),
            end: Some(date("2024-01-15")),
            ..Default::default()
        };
        assert_eq!(
            resolve_range(&query).unwrap(),
            (date("2024-01-01"), date("2024-01-15"))
        );
    }

    #[test]
    fn test_resolve_range_invalid() {
        assert!(resolve_range(&AttendanceRecapQuery::default()).is_err());

        let reversed = AttendanceRecapQuery {
            start: Some(date("2024-02-01")),
            end: Some(date("2024-01-01")),
            ..Default::default()
        };
        assert!(resolve_range(&reversed).is_err());

        let bad_month = AttendanceRecapQuery {
            month: Some("2024-13".into()),
            ..Default::default()
        };
        assert!(resolve_range(&bad_month).is_err());
    }

    #[test]
    fn test_recap_response_state() {
        let ready = RecapService::recap_response(3, true, Some(1u32));
        assert_eq!(ready.state, LoadState::Ready);
        assert!(!ready.superseded);

        let empty = RecapService::recap_response::<u32>(4, false, None);
        assert_eq!(empty.state, LoadState::Empty);
        assert!(empty.superseded);
    }
}
