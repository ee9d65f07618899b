use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (User ID)
    pub sub: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// Token Type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Access Token 생성
///
/// 토큰 발급은 외부 인증 서버 몫이고, 같은 시크릿을 공유하는 도구와 테스트에서 사용합니다.
pub fn encode_token(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::InternalError("Invalid token expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub,
        iat: now.timestamp() as usize,
        exp: expiration,
        token_type: Some(ACCESS_TOKEN_TYPE.to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// JWT 토큰 검증
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token has expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })
}

/// Access Token만 허용하는 검증
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let claims = decode_token(token, secret)?;

    match claims.token_type.as_deref() {
        None | Some(ACCESS_TOKEN_TYPE) => Ok(claims),
        Some(_) => Err(AppError::Unauthorized("Access token required".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let secret = "test_secret";
        let sub = "123".to_string();

        let token = encode_token(sub.clone(), secret, 3600).expect("Token generation failed");
        let claims = decode_access_token(&token, secret).expect("Token validation failed");

        assert_eq!(claims.sub, sub);
        assert_eq!(claims.token_type.as_deref(), Some("access"));
    }

    #[test]
    fn test_invalid_token() {
        let result = decode_token("invalid_token", "test_secret");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_secret() {
        let token = encode_token("1".to_string(), "secret-a", 3600).unwrap();
        let result = decode_token(&token, "secret-b");
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        // jsonwebtoken 기본 leeway(60초)를 넘기도록 충분히 과거로 설정
        let token = encode_token("1".to_string(), "secret", -3600).unwrap();
        let result = decode_token(&token, "secret");
        assert!(matches!(result, Err(AppError::Unauthorized(ref m)) if m.contains("expired")));
    }
}
