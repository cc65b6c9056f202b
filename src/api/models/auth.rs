use serde::{Deserialize, Serialize};

use super::user::User;

/// 登录请求
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtResponse {
    pub jwt: String,
    pub user: User,
}
