//! 学生 CSV 导入
//!
//! 解析 -> 校验 -> 按 NISN 对账 -> 后台顺序执行写入。

pub mod execute;
pub mod jobs;
pub mod parse;
pub mod reconcile;
pub mod template;
pub mod upload;
pub mod validate;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::imports::{
    ImportPreviewResponse, InvalidRow, ReconciledRows, StartImportResponse, ValidRow,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use self::jobs::ImportJobs;

pub struct ImportService {
    storage: Option<Arc<dyn Storage>>,
    jobs: Arc<ImportJobs>,
}

/// 已解析并对账的上传文件
struct PreparedImport {
    valid: Vec<ValidRow>,
    invalid: Vec<InvalidRow>,
    duplicate_nisns: Vec<String>,
    reconciled: ReconciledRows,
}

impl ImportService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            jobs: Arc::new(ImportJobs::new()),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    /// 读取上传、解析、校验并对账；失败时直接给出响应
    async fn prepare(
        &self,
        teacher_id: i64,
        payload: &mut Multipart,
        request: &HttpRequest,
    ) -> Result<PreparedImport, HttpResponse> {
        let config = &AppConfig::get().import;

        let data = upload::read_file_field(payload, config.max_file_size)
            .await
            .map_err(|e| {
                HttpResponse::BadRequest().json(ApiResponse::error_empty(e.error_code(), e.message()))
            })?;

        let rows = parse::parse_rows(&data);
        if rows.len() > config.max_rows {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportTooManyRows,
                format!("A single import supports at most {} rows", config.max_rows),
            )));
        }

        let (valid, invalid) = validate::validate_rows(&rows);

        let nisns = reconcile::collect_nisns(&valid);
        let existing = if nisns.is_empty() {
            Default::default()
        } else {
            self.get_storage(request)
                .find_student_ids_by_nisn(teacher_id, &nisns)
                .await
                .map_err(|e| super::error_response(&e, ErrorCode::InternalServerError))?
        };
        let duplicate_nisns = reconcile::duplicate_nisns(&valid);
        if !duplicate_nisns.is_empty() {
            warn!(
                "Import file for teacher {} repeats NISN(s): {}",
                teacher_id,
                duplicate_nisns.join(", ")
            );
        }
        let reconciled = reconcile::reconcile(valid.clone(), &existing);

        Ok(PreparedImport {
            valid,
            invalid,
            duplicate_nisns,
            reconciled,
        })
    }

    // 预览：不写入
    pub async fn preview(
        &self,
        mut payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let prepared = match self.prepare(teacher_id, &mut payload, request).await {
            Ok(prepared) => prepared,
            Err(response) => return Ok(response),
        };

        let plan = prepared.reconciled.plan();
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            ImportPreviewResponse {
                valid: prepared.valid,
                invalid: prepared.invalid,
                plan,
                duplicate_nisns: prepared.duplicate_nisns,
            },
            "Import preview ready",
        )))
    }

    // 启动后台导入
    pub async fn start(
        &self,
        mut payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let prepared = match self.prepare(teacher_id, &mut payload, request).await {
            Ok(prepared) => prepared,
            Err(response) => return Ok(response),
        };

        let plan = prepared.reconciled.plan();
        let job_id = self.jobs.start(teacher_id, plan);
        info!(
            "Teacher {} started import {}: {} inserts, {} updates, {} invalid rows",
            teacher_id,
            job_id,
            plan.insert,
            plan.update,
            prepared.invalid.len()
        );

        let storage = self.get_storage(request);
        let jobs = self.jobs.clone();
        let batch_size = AppConfig::get().import.batch_size;
        let reconciled = prepared.reconciled;
        tokio::spawn(async move {
            let tally = execute::execute_import(
                storage.as_ref(),
                teacher_id,
                reconciled,
                batch_size,
                |tally| jobs.record(job_id, tally),
            )
            .await;
            jobs.finish(job_id, tally);
            info!(
                "Import {} done: {} inserted, {} updated, {} failed",
                job_id, tally.inserted, tally.updated, tally.failed
            );
        });

        Ok(HttpResponse::Accepted().json(ApiResponse::success(
            StartImportResponse {
                job_id: job_id.to_string(),
                plan,
                invalid: prepared.invalid,
                duplicate_nisns: prepared.duplicate_nisns,
            },
            "Import started",
        )))
    }

    // 查询导入进度
    pub async fn progress(&self, job_id: Uuid, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let teacher_id = match super::current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        match self.jobs.snapshot(job_id, teacher_id) {
            Some(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                progress,
                "Import progress retrieved",
            ))),
            None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ImportJobNotFound,
                "Import job not found",
            ))),
        }
    }

    // 下载模板
    pub async fn template(&self) -> ActixResult<HttpResponse> {
        template::download_template().await
    }
}
