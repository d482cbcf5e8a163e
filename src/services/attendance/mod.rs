pub mod save;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::{AttendanceSheetQuery, SaveAttendanceRequest};
use crate::storage::Storage;

pub use sheet::{build_attendance_sheet, load_attendance_sheet};

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 日考勤表
    pub async fn get_sheet(
        &self,
        request: &HttpRequest,
        query: AttendanceSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, request, query).await
    }

    // 保存考勤
    pub async fn save(
        &self,
        request: &HttpRequest,
        save_request: SaveAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_attendance(self, save_request, request).await
    }
}
