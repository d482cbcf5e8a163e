//! 路径参数提取器，解析失败直接返回 400

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::models::recap::RecapKind;
use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message.clone()));
    InternalError::from_response(message, response).into()
}

fn path_segment<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.match_info().get(name).unwrap_or("")
}

/// 正整数 `{id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = path_segment(req, "id");
        ready(match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => Err(bad_path(format!("Invalid id: {raw}"))),
        })
    }
}

/// 导入任务 `{job_id}`
#[derive(Debug, Clone, Copy)]
pub struct SafeJobId(pub Uuid);

impl FromRequest for SafeJobId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = path_segment(req, "job_id");
        ready(
            Uuid::parse_str(raw)
                .map(SafeJobId)
                .map_err(|_| bad_path(format!("Invalid import job id: {raw}"))),
        )
    }
}

/// 汇总类型 `{kind}`
#[derive(Debug, Clone, Copy)]
pub struct SafeRecapKind(pub RecapKind);

impl FromRequest for SafeRecapKind {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = path_segment(req, "kind");
        ready(
            raw.parse::<RecapKind>()
                .map(SafeRecapKind)
                .map_err(bad_path),
        )
    }
}
