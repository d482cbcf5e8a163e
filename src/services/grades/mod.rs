pub mod save;
pub mod sheet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::{GradeSheetQuery, SaveGradesRequest};
use crate::storage::Storage;

pub use sheet::{build_grade_sheet, load_grade_sheet};

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 成绩表
    pub async fn get_sheet(
        &self,
        request: &HttpRequest,
        query: GradeSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, request, query).await
    }

    // 保存成绩
    pub async fn save(
        &self,
        request: &HttpRequest,
        save_request: SaveGradesRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_grades(self, save_request, request).await
    }
}
