use reqwest::StatusCode;

use crate::api::ApiClient;
use crate::api::models::{JwtResponse, LoginRequest};
use crate::error::{ClientError, Result};

/// 认证接口
pub struct AuthOperations;

impl AuthOperations {
    /// 登录，401 映射为凭证错误，其余失败统一为登录失败
    pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<JwtResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match api.post::<JwtResponse, _>("auth/login", &request).await {
            Ok(response) => Ok(response),
            Err(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => {
                tracing::error!("Login error: {}", e);
                Err(ClientError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                Err(ClientError::AuthenticationFailed)
            }
        }
    }
}
