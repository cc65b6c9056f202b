use crate::api::ApiClient;
use crate::api::models::{CreateUser, User};
use crate::error::Result;

/// 用户管理接口
pub struct UserOperations;

impl UserOperations {
    pub async fn list(api: &ApiClient) -> Result<Vec<User>> {
        api.get("users").await
    }

    pub async fn get(api: &ApiClient, user_id: i64) -> Result<User> {
        api.get(&format!("users/{}", user_id)).await
    }

    /// 邮箱重复时后端返回 409
    pub async fn add(api: &ApiClient, user: &CreateUser) -> Result<User> {
        api.post("users", user).await
    }

    pub async fn update(api: &ApiClient, user: &User) -> Result<User> {
        api.put(&format!("users/{}", user.id), user).await
    }

    pub async fn delete(api: &ApiClient, user_id: i64) -> Result<()> {
        api.delete(&format!("users/{}", user_id)).await
    }
}
