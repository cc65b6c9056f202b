// 通用的数据结构定义

use serde::{Deserialize, Serialize};

/// 分页响应
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    /// 当前页码，从 0 开始
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// 取消订单等接口返回的状态消息
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 空请求体
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct EmptyRequest {}
