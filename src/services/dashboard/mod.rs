//! 首页概览

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::dashboard::DashboardResponse;
use crate::models::schedules::day_name;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::attendance::build_attendance_sheet;
use super::{current_teacher_id, error_response};

/// 1 = 周一 … 7 = 周日
pub fn day_of_week(date: NaiveDate) -> i32 {
    date.weekday().number_from_monday() as i32
}

pub async fn load_dashboard(
    storage: &dyn Storage,
    teacher_id: i64,
    today: NaiveDate,
) -> Result<DashboardResponse> {
    let students = storage
        .list_students(teacher_id, Default::default())
        .await?;
    let records = storage.list_attendance_on(teacher_id, today).await?;
    let day = day_of_week(today);
    let schedule = storage.list_schedules_on_day(teacher_id, day).await?;

    let student_count = students.len() as u64;
    let sheet = build_attendance_sheet(today, None, students, records);

    Ok(DashboardResponse {
        student_count,
        today,
        day_name: day_name(day).to_string(),
        attendance: sheet.counts,
        attendance_filled: sheet.filled,
        schedule,
    })
}

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);
        let today = Local::now().date_naive();

        match load_dashboard(storage.as_ref(), teacher_id, today).await {
            Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                overview,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week() {
        // 2024-01-01 是周一
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 1);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()), 7);
        assert_eq!(day_name(day_of_week(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())), "Jumat");
    }
}
