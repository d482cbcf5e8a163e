use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (teacher ID)
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub jti: String,        // 令牌唯一 ID，注销后按令牌吊销
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn teacher_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 生成 Access Token
    pub fn generate_access_token(teacher_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            teacher_id,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        teacher_id: i64,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = token_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::generate_token_with_expiry(teacher_id, REFRESH_TOKEN, expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        teacher_id: i64,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode_with_secret(
            &Self::get_secret(),
            teacher_id,
            token_type,
            expiry_duration,
        )
    }

    fn encode_with_secret(
        secret: &str,
        teacher_id: i64,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: teacher_id.to_string(),
            token_type: token_type.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    fn decode_with_secret(
        secret: &str,
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let claims = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 生成完整的 Token 响应（包含 access 和 refresh token）
    pub fn generate_token_pair(
        teacher_id: i64,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = Self::generate_access_token(teacher_id)?;
        let refresh_token = Self::generate_refresh_token(teacher_id, refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(&Self::get_secret(), token, ACCESS_TOKEN)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(&Self::get_secret(), token, REFRESH_TOKEN)
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let teacher_id = claims
            .teacher_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(teacher_id)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build("refresh_token", refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build("refresh_token", "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie("refresh_token")
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip_keeps_teacher_id() {
        let token =
            JwtUtils::encode_with_secret(SECRET, 42, ACCESS_TOKEN, chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::decode_with_secret(SECRET, &token, ACCESS_TOKEN).unwrap();
        assert_eq!(claims.teacher_id(), Some(42));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let token =
            JwtUtils::encode_with_secret(SECRET, 7, REFRESH_TOKEN, chrono::Duration::days(1))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(SECRET, &token, ACCESS_TOKEN).is_err());
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let a = JwtUtils::encode_with_secret(SECRET, 1, ACCESS_TOKEN, chrono::Duration::minutes(5))
            .unwrap();
        let b = JwtUtils::encode_with_secret(SECRET, 1, ACCESS_TOKEN, chrono::Duration::minutes(5))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            JwtUtils::encode_with_secret(SECRET, 1, ACCESS_TOKEN, chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::decode_with_secret("other", &token, ACCESS_TOKEN).is_err());
    }
}
