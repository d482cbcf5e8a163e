use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::{revoked_cache_key, session_cache_key};
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：吊销当前访问令牌，清除会话缓存与 refresh_token cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(session), Some(cache)) = (
        RequireJWT::extract_session(request),
        service.get_cache(request),
    ) {
        cache.remove(&session_cache_key(&session.jti)).await;
        // 吊销记录保留到令牌自然过期
        let ttl = session.remaining_secs().max(1);
        cache
            .insert_raw(revoked_cache_key(&session.jti), "1".to_string(), ttl)
            .await;
        tracing::info!(
            "Session {} signed out for teacher {:?}",
            session.jti,
            RequireJWT::extract_teacher_id(request)
        );
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
