use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 后端记录的下单失败等错误
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub id: i64,
    pub order_id: Option<i64>,
    pub operation: String,
    pub error_message: String,
    pub timestamp: NaiveDateTime,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
}
