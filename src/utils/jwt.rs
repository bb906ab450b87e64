use std::collections::HashMap;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::JwtConfig;
use crate::errors::{GradesError, Result};

// JWT Claims 结构体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Subject (调用方身份)
    pub role: String, // 调用方角色
    pub exp: usize,   // Expiration time (时间戳)
    pub iat: usize,   // Issued at (签发时间)
}

/// 外部认证协作方
///
/// 服务层只依赖该接口，验证失败一律视为 Unauthenticated，不重试。
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims>;
}

/// 基于共享密钥 (HS256) 的 JWT 验证器
pub struct JwtVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(GradesError::configuration(
                "jwt.secret must be set (JWT_SECRET)",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    // 签发 Token（用于运维工具和测试）
    pub fn issue(&self, sub: &str, role: &str, expiry: chrono::Duration) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry;

        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| GradesError::configuration(format!("failed to sign token: {e}")))
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|err| {
                info!("JWT token validation failed: {}", err);
                GradesError::unauthenticated("invalid token")
            })
    }
}

/// 固定 token 表验证器，用于测试和本地调试
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Claims>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, sub: &str, role: &str) -> Self {
        self.tokens.insert(
            token.into(),
            Claims {
                sub: sub.to_string(),
                role: role.to_string(),
                exp: usize::MAX,
                iat: 0,
            },
        );
        self
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Result<Claims> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| GradesError::unauthenticated("invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            leeway: 0,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let verifier = JwtVerifier::new(&jwt_config("test-secret")).unwrap();
        let token = verifier
            .issue("prof-smith", "staff", chrono::Duration::minutes(5))
            .unwrap();

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "prof-smith");
        assert_eq!(claims.role, "staff");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtVerifier::new(&jwt_config("secret-a")).unwrap();
        let verifier = JwtVerifier::new(&jwt_config("secret-b")).unwrap();
        let token = issuer
            .issue("prof-smith", "staff", chrono::Duration::minutes(5))
            .unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(GradesError::Unauthenticated(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = JwtVerifier::new(&jwt_config("test-secret")).unwrap();
        let token = verifier
            .issue("prof-smith", "staff", chrono::Duration::minutes(-10))
            .unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let verifier = JwtVerifier::new(&jwt_config("test-secret")).unwrap();
        assert!(verifier.verify("not-a-jwt").is_err());
        assert!(verifier.verify("").is_err());
    }

    #[test]
    fn test_empty_secret_is_a_configuration_error() {
        assert!(matches!(
            JwtVerifier::new(&jwt_config("")),
            Err(GradesError::Configuration(_))
        ));
    }

    #[test]
    fn test_static_verifier() {
        let verifier = StaticTokenVerifier::new().with_token("test-token", "tester", "staff");
        assert_eq!(verifier.verify("test-token").unwrap().sub, "tester");
        assert!(verifier.verify("other").is_err());
    }
}
