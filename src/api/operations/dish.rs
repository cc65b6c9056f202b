use crate::api::ApiClient;
use crate::api::models::Dish;
use crate::error::Result;

/// 菜品接口
pub struct DishOperations;

impl DishOperations {
    pub async fn available(api: &ApiClient) -> Result<Vec<Dish>> {
        api.get("dishes/available").await
    }
}
