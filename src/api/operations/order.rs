use crate::api::ApiClient;
use crate::api::models::{CreateOrder, EmptyRequest, Order, OrderSearch, StatusMessage};
use crate::error::Result;

/// 订单接口
pub struct OrderOperations;

impl OrderOperations {
    pub async fn search(api: &ApiClient, criteria: &OrderSearch) -> Result<Vec<Order>> {
        api.post("orders/search", criteria).await
    }

    pub async fn place(api: &ApiClient, order: &CreateOrder) -> Result<Order> {
        api.post("orders", order).await
    }

    pub async fn schedule(api: &ApiClient, order: &CreateOrder) -> Result<Order> {
        api.post("orders/schedule", order).await
    }

    pub async fn cancel(api: &ApiClient, order_id: i64) -> Result<StatusMessage> {
        api.put(&format!("orders/{}/cancel", order_id), &EmptyRequest {})
            .await
    }

    pub async fn track(api: &ApiClient, order_id: i64) -> Result<Order> {
        api.get(&format!("orders/{}/track", order_id)).await
    }
}
