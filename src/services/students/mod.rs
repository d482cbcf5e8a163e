pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::{
    CreateStudentRequest, Gender, NewStudent, StudentListQuery, UpdateStudentRequest,
};
use crate::storage::Storage;
use crate::utils::validate::normalize_optional;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

/// 规范化表单输入：去空白，空 NISN 视为无
pub(crate) fn normalize_student(
    nisn: Option<String>,
    name: &str,
    class: &str,
    gender: Gender,
) -> Result<NewStudent, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty");
    }
    let class = class.trim();
    if class.is_empty() {
        return Err("Class cannot be empty");
    }
    // NISN 不限格式，与 CSV 导入规则一致
    let nisn = normalize_optional(nisn);

    Ok(NewStudent {
        nisn,
        name: name.to_string(),
        class: class.to_string(),
        gender,
    })
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    // 班级列表
    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classes(self, request).await
    }

    // 获取单个学生
    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    // 创建学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student_data, request).await
    }

    // 更新学生
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, update_data, request).await
    }

    // 删除学生
    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::imports::RawImportRow;
    use crate::services::imports::validate::validate_row;

    #[test]
    fn test_normalize_student_trims() {
        let student =
            normalize_student(Some("  ".into()), " Ani ", " 7A ", Gender::Female).unwrap();
        assert_eq!(student.nisn, None);
        assert_eq!(student.name, "Ani");
        assert_eq!(student.class, "7A");
    }

    #[test]
    fn test_normalize_student_rejects_empty_fields() {
        assert!(normalize_student(None, "  ", "7A", Gender::Male).is_err());
        assert!(normalize_student(None, "Budi", "", Gender::Male).is_err());
    }

    #[test]
    fn test_normalize_student_trims_nisn() {
        let student = normalize_student(Some(" 0012 ".into()), "Budi", "7A", Gender::Male).unwrap();
        assert_eq!(student.nisn.as_deref(), Some("0012"));
    }

    #[test]
    fn test_imported_student_can_be_saved_through_form() {
        let raw = RawImportRow {
            nisn: "A-001".into(),
            name: "Ani".into(),
            class: "7A".into(),
            gender: "P".into(),
        };
        let imported = validate_row(&raw).unwrap();

        let saved = normalize_student(
            imported.nisn.clone(),
            &imported.name,
            &imported.class,
            imported.gender,
        )
        .unwrap();
        assert_eq!(saved, imported.to_new_student());
    }
}
