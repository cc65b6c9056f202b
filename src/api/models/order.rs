use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::dish::Dish;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Ordered,
    Preparing,
    InDelivery,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Ordered,
        OrderStatus::Preparing,
        OrderStatus::InDelivery,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    /// 只有初始状态的订单可以取消
    pub fn is_initial(self) -> bool {
        self == OrderStatus::Ordered
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ORDERED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::InDelivery => "IN_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub created_by_id: i64,
    #[serde(default)]
    pub created_by_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub items: Vec<Dish>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub scheduled_for: Option<NaiveDateTime>,
    pub status_updated_at: NaiveDateTime,
}

/// 按名称和价格合并后的订单条目
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl Order {
    /// 同名同价的菜品合并计数，保持首次出现的顺序
    pub fn grouped_items(&self) -> Vec<GroupedItem> {
        let mut grouped: Vec<GroupedItem> = Vec::new();
        for item in &self.items {
            match grouped
                .iter_mut()
                .find(|g| g.name == item.name && g.price == item.price)
            {
                Some(existing) => existing.quantity += 1,
                None => grouped.push(GroupedItem {
                    name: item.name.clone(),
                    price: item.price,
                    quantity: 1,
                }),
            }
        }
        grouped
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|d| d.price).sum()
    }
}

/// 下单请求，同一菜品按数量重复出现
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub dish_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<NaiveDateTime>,
}

/// 订单搜索条件，全部可选；默认值即不过滤
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<OrderStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}
