//! 每周课程表

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::{
    CreateScheduleRequest, Schedule, ScheduleDay, ScheduleWeekResponse, day_name,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{normalize_optional, validate_day_of_week, validate_time};

use super::{current_teacher_id, error_response};

/// 按周一到周日分组，输入已按星期、开始时间排序
pub fn group_by_day(slots: Vec<Schedule>) -> Vec<ScheduleDay> {
    let mut days: Vec<ScheduleDay> = (1..=7)
        .map(|day| ScheduleDay {
            day_of_week: day,
            day_name: day_name(day).to_string(),
            slots: Vec::new(),
        })
        .collect();

    for slot in slots {
        if let Some(day) = days.iter_mut().find(|d| d.day_of_week == slot.day_of_week) {
            day.slots.push(slot);
        }
    }
    days
}

/// 校验并规范化新建请求
pub(crate) fn normalize_schedule(
    mut req: CreateScheduleRequest,
) -> Result<CreateScheduleRequest, &'static str> {
    validate_day_of_week(req.day_of_week)?;

    req.subject = req.subject.trim().to_string();
    if req.subject.is_empty() {
        return Err("Subject cannot be empty");
    }
    req.class = req.class.trim().to_string();
    if req.class.is_empty() {
        return Err("Class cannot be empty");
    }

    req.start_time = req.start_time.trim().to_string();
    req.end_time = req.end_time.trim().to_string();
    validate_time(&req.start_time)?;
    validate_time(&req.end_time)?;
    if req.end_time <= req.start_time {
        return Err("End time must be after start time");
    }

    req.room = normalize_optional(req.room);
    Ok(req)
}

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_week(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match storage.list_schedules(teacher_id).await {
            Ok(slots) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ScheduleWeekResponse {
                    days: group_by_day(slots),
                },
                "Schedule retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn create_slot(
        &self,
        request: &HttpRequest,
        create_request: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let create_request = match normalize_schedule(create_request) {
            Ok(req) => req,
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ScheduleInvalid, msg)));
            }
        };

        let storage = self.get_storage(request);
        match storage.create_schedule(teacher_id, create_request).await {
            Ok(slot) => Ok(HttpResponse::Created().json(ApiResponse::success(
                slot,
                "Schedule slot created successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn delete_slot(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match storage.delete_schedule(teacher_id, schedule_id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Schedule slot deleted successfully"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule slot not found",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn slot(id: i64, day: i32, start: &str) -> Schedule {
        Schedule {
            id,
            teacher_id: 1,
            day_of_week: day,
            subject: "Matematika".into(),
            class: "7A".into(),
            start_time: start.into(),
            end_time: "23:59".into(),
            room: None,
            created_at: Utc::now(),
        }
    }

    fn request(day: i32, start: &str, end: &str) -> CreateScheduleRequest {
        CreateScheduleRequest {
            day_of_week: day,
            subject: " IPA ".into(),
            class: "7A".into(),
            start_time: start.into(),
            end_time: end.into(),
            room: Some("  ".into()),
        }
    }

    #[test]
    fn test_group_by_day_includes_empty_days() {
        let days = group_by_day(vec![slot(1, 1, "07:00"), slot(2, 1, "09:00"), slot(3, 5, "08:00")]);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day_name, "Senin");
        assert_eq!(days[0].slots.len(), 2);
        assert!(days[1].slots.is_empty());
        assert_eq!(days[4].slots[0].id, 3);
        assert_eq!(days[6].day_name, "Minggu");
    }

    #[test]
    fn test_normalize_schedule() {
        let req = normalize_schedule(request(2, "07:00", "08:30")).unwrap();
        assert_eq!(req.subject, "IPA");
        assert_eq!(req.room, None);

        assert!(normalize_schedule(request(0, "07:00", "08:30")).is_err());
        assert!(normalize_schedule(request(8, "07:00", "08:30")).is_err());
        assert!(normalize_schedule(request(1, "7:00", "08:30")).is_err());
        assert!(normalize_schedule(request(1, "09:00", "08:30")).is_err());
    }
}
