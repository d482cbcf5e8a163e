//! 可打印报表，以 CSV 附件下载

pub mod render;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::errors::ClassroomError;
use crate::middlewares::RequireJWT;
use crate::models::attendance::AttendanceSheetQuery;
use crate::models::grades::GradeSheetQuery;
use crate::models::recap::{AttendanceRecapQuery, GradeRecapQuery};
use crate::models::teachers::Teacher;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::normalize_optional;

use super::attendance::load_attendance_sheet;
use super::error_response;
use super::grades::load_grade_sheet;
use super::recap::{load_attendance_recap, load_grade_recap, resolve_range};
use self::render::ReportHeading;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

fn class_label(class: &Option<String>) -> String {
    class.clone().unwrap_or_else(|| "All classes".to_string())
}

fn report_heading(teacher: &Teacher, title: &str, details: Vec<(&str, String)>) -> ReportHeading {
    ReportHeading {
        school: teacher.school_label().to_string(),
        teacher: teacher.full_name.clone(),
        title: title.to_string(),
        details: details
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    }
}

fn csv_attachment(
    rendered: Result<Vec<u8>, csv::Error>,
    file_name: &str,
) -> ActixResult<HttpResponse> {
    match rendered {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(data)),
        Err(e) => {
            error!("Failed to render report {}: {}", file_name, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Failed to render report",
            )))
        }
    }
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    fn current_teacher(request: &HttpRequest) -> Result<Teacher, HttpResponse> {
        RequireJWT::extract_teacher(request).ok_or_else(|| {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            ))
        })
    }

    // 日考勤表
    pub async fn attendance_sheet(
        &self,
        request: &HttpRequest,
        query: AttendanceSheetQuery,
    ) -> ActixResult<HttpResponse> {
        let teacher = match Self::current_teacher(request) {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        let sheet =
            match load_attendance_sheet(storage.as_ref(), teacher.id, query.date, query.class).await
            {
                Ok(sheet) => sheet,
                Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
            };

        let heading = report_heading(
            &teacher,
            "Attendance sheet",
            vec![
                ("Class", class_label(&sheet.class)),
                ("Date", sheet.date.to_string()),
            ],
        );
        csv_attachment(
            render::attendance_sheet_csv(&heading, &sheet),
            &format!("attendance-sheet-{}.csv", sheet.date),
        )
    }

    // 成绩表
    pub async fn grade_sheet(
        &self,
        request: &HttpRequest,
        query: GradeSheetQuery,
    ) -> ActixResult<HttpResponse> {
        let teacher = match Self::current_teacher(request) {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        let sheet = match load_grade_sheet(storage.as_ref(), teacher.id, query).await {
            Ok(sheet) => sheet,
            Err(e @ ClassroomError::Validation(_)) => {
                return Ok(error_response(&e, ErrorCode::GradeSubjectRequired));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
        };

        let heading = report_heading(
            &teacher,
            "Grade sheet",
            vec![
                ("Class", class_label(&sheet.class)),
                ("Subject", sheet.subject.clone()),
                ("Assessment", sheet.assessment_name.clone()),
                ("Date", sheet.date.to_string()),
            ],
        );
        csv_attachment(
            render::grade_sheet_csv(&heading, &sheet),
            &format!("grade-sheet-{}.csv", sheet.date),
        )
    }

    // 考勤汇总
    pub async fn attendance_recap(
        &self,
        request: &HttpRequest,
        query: AttendanceRecapQuery,
    ) -> ActixResult<HttpResponse> {
        let teacher = match Self::current_teacher(request) {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let (start, end) = match resolve_range(&query) {
            Ok(range) => range,
            Err(e) => return Ok(error_response(&e, ErrorCode::RecapFilterInvalid)),
        };
        let class = normalize_optional(query.class);
        let storage = self.get_storage(request);

        let recap =
            match load_attendance_recap(storage.as_ref(), teacher.id, class.clone(), start, end)
                .await
            {
                Ok(recap) => recap,
                Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
            };

        let period = format!("{start} - {}", end.pred_opt().unwrap_or(end));
        let heading = report_heading(
            &teacher,
            "Attendance recap",
            vec![("Class", class_label(&class)), ("Period", period)],
        );
        csv_attachment(
            render::attendance_recap_csv(&heading, &recap),
            &format!("attendance-recap-{start}.csv"),
        )
    }

    // 成绩汇总
    pub async fn grade_recap(
        &self,
        request: &HttpRequest,
        query: GradeRecapQuery,
    ) -> ActixResult<HttpResponse> {
        let teacher = match Self::current_teacher(request) {
            Ok(teacher) => teacher,
            Err(response) => return Ok(response),
        };
        let subject = query.subject.trim().to_string();
        if subject.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RecapFilterInvalid,
                "Subject is required",
            )));
        }
        let class = normalize_optional(query.class);
        let storage = self.get_storage(request);

        let recap = match load_grade_recap(storage.as_ref(), teacher.id, &subject, class.clone())
            .await
        {
            Ok(recap) => recap,
            Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
        };

        let heading = report_heading(
            &teacher,
            "Grade recap",
            vec![("Class", class_label(&class)), ("Subject", subject.clone())],
        );
        csv_attachment(
            render::grade_recap_csv(&heading, &recap),
            "grade-recap.csv",
        )
    }
}
