use crate::api::ApiClient;
use crate::api::models::{ErrorMessage, Page};
use crate::error::Result;

/// 错误日志接口
pub struct ErrorMessageOperations;

impl ErrorMessageOperations {
    pub async fn page(api: &ApiClient, page: u32, size: u32) -> Result<Page<ErrorMessage>> {
        api.get_with_query("errors", &[("page", page), ("size", size)])
            .await
    }

    pub async fn all(api: &ApiClient) -> Result<Vec<ErrorMessage>> {
        api.get("errors/all").await
    }
}
