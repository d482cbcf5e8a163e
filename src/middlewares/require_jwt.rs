/*!
 * JWT 认证中间件
 *
 * 验证访问令牌并把当前教师放入请求扩展，处理程序只从这里读取身份。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, HttpRequest, HttpResponse, Result};
 * use crate::middlewares::RequireJWT;
 *
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students));
 *
 * async fn list_students(req: HttpRequest) -> Result<HttpResponse> {
 *     let teacher_id = RequireJWT::extract_teacher_id(&req);
 *     // ...
 * }
 * ```
 *
 * ## 会话
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 已注销的令牌（`revoked:{jti}`）直接拒绝
 * 3. 令牌对应的教师缓存在 `session:{jti}`，未命中时回源数据库
 * 4. 教师与 `SessionToken` 写入请求扩展
 */

use crate::cache::{self, CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::teachers::Teacher;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 当前请求所用访问令牌的标识
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub jti: String,
    /// 过期时间戳（秒）
    pub exp: usize,
}

impl SessionToken {
    /// 剩余有效秒数
    pub fn remaining_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        (self.exp as u64).saturating_sub(now)
    }
}

pub fn session_cache_key(jti: &str) -> String {
    format!("session:{jti}")
}

pub fn revoked_cache_key(jti: &str) -> String {
    format!("revoked:{jti}")
}

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                message,
            )),
    }
}

// 辅助函数：提取并验证 JWT access token，解析出当前教师
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<(Teacher, Claims), String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Session cache unavailable".to_string())?
        .get_ref()
        .clone();

    if let CacheResult::Found(_) = cache.get_raw(&revoked_cache_key(&claims.jti)).await {
        return Err("Session has been signed out".to_string());
    }

    // 从缓存中获取会话
    let session_key = session_cache_key(&claims.jti);
    if let CacheResult::Found(teacher) = cache::get_json::<Teacher>(cache.as_ref(), &session_key).await
    {
        return Ok((teacher, claims));
    }
    debug!("Session cache miss for token {}", claims.jti);

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage unavailable".to_string())?
        .get_ref()
        .clone();

    let teacher_id = claims
        .teacher_id()
        .ok_or_else(|| "Invalid teacher ID in JWT".to_string())?;

    let teacher = storage
        .get_teacher_by_id(teacher_id)
        .await
        .map_err(|_| "Failed to retrieve teacher from storage".to_string())?
        .ok_or_else(|| "Teacher not found".to_string())?;

    // 会话缓存不超过令牌剩余有效期
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let ttl = (claims.exp as u64)
        .saturating_sub(now)
        .clamp(1, AppConfig::get().cache.default_ttl.max(1));
    cache::insert_json(cache.as_ref(), session_key, &teacher, ttl).await;

    Ok((teacher, claims))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok((teacher, claims)) => {
                    debug!("JWT authentication successful for teacher {}", teacher.id);
                    req.extensions_mut().insert(SessionToken {
                        jti: claims.jti,
                        exp: claims.exp,
                    });
                    req.extensions_mut().insert(teacher);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取会话信息
impl RequireJWT {
    /// 当前登录的教师
    pub fn extract_teacher(req: &actix_web::HttpRequest) -> Option<Teacher> {
        req.extensions().get::<Teacher>().cloned()
    }

    /// 当前登录教师的 ID
    pub fn extract_teacher_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Teacher>().map(|teacher| teacher.id)
    }

    pub fn extract_session(req: &actix_web::HttpRequest) -> Option<SessionToken> {
        req.extensions().get::<SessionToken>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(session_cache_key("abc"), "session:abc");
        assert_eq!(revoked_cache_key("abc"), "revoked:abc");
    }

    #[test]
    fn test_remaining_secs_never_negative() {
        let expired = SessionToken {
            jti: "x".to_string(),
            exp: 10,
        };
        assert_eq!(expired.remaining_secs(), 0);

        let future = SessionToken {
            jti: "y".to_string(),
            exp: (chrono::Utc::now().timestamp() + 60) as usize,
        };
        assert!(future.remaining_secs() > 0 && future.remaining_secs() <= 60);
    }
}
