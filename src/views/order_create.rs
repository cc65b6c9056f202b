use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::api::models::{CreateOrder, Dish, Order};
use crate::api::operations::{DishOperations, OrderOperations};
use crate::error::{ClientError, Result};
use crate::feed::OrderFeed;
use crate::router::{DEFAULT_ROUTE, Navigation};
use crate::session::{Permission, SessionAuthority};
use crate::visibility::is_visible;

pub const EMPTY_SELECTION: &str = "Please select at least one dish";
pub const MISSING_SCHEDULE: &str = "Please select a scheduled date and time";
pub const PAST_SCHEDULE: &str = "Scheduled time must be in the future";

pub struct OrderCreateView {
    authority: Arc<SessionAuthority>,
    feed: Arc<OrderFeed>,
    pub dishes: Vec<Dish>,
    /// 菜品 id -> 数量，只保存数量大于 0 的
    quantities: BTreeMap<i64, u32>,
    // 记录选择顺序
    selected: Vec<i64>,
    pub selected_category: Option<String>,
    pub is_scheduled: bool,
    pub scheduled_for: Option<NaiveDateTime>,
    pub notice: Option<String>,
}

impl OrderCreateView {
    pub fn mount(authority: Arc<SessionAuthority>, feed: Arc<OrderFeed>) -> Self {
        Self {
            authority,
            feed,
            dishes: Vec::new(),
            quantities: BTreeMap::new(),
            selected: Vec::new(),
            selected_category: None,
            is_scheduled: false,
            scheduled_for: None,
            notice: None,
        }
    }

    pub async fn load_dishes(&mut self) -> Result<()> {
        match DishOperations::available(self.authority.api()).await {
            Ok(dishes) => {
                self.dishes = dishes;
                self.quantities.clear();
                self.selected.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading dishes: {}", e);
                self.notice = Some(e.notice("loading dishes"));
                Err(e)
            }
        }
    }

    /// 按首次出现顺序去重的分类
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for dish in &self.dishes {
            if !categories.contains(&dish.category) {
                categories.push(dish.category.clone());
            }
        }
        categories
    }

    pub fn filtered_dishes(&self) -> Vec<&Dish> {
        match &self.selected_category {
            Some(category) => self
                .dishes
                .iter()
                .filter(|d| &d.category == category)
                .collect(),
            None => self.dishes.iter().collect(),
        }
    }

    pub fn set_quantity(&mut self, dish_id: i64, quantity: u32) {
        if quantity > 0 {
            self.quantities.insert(dish_id, quantity);
            if !self.selected.contains(&dish_id) {
                self.selected.push(dish_id);
            }
        } else {
            self.quantities.remove(&dish_id);
            self.selected.retain(|id| *id != dish_id);
        }
    }

    pub fn quantity(&self, dish_id: i64) -> u32 {
        self.quantities.get(&dish_id).copied().unwrap_or(0)
    }

    pub fn total_price(&self) -> f64 {
        self.selected
            .iter()
            .filter_map(|id| {
                self.dishes
                    .iter()
                    .find(|d| d.id == *id)
                    .map(|d| d.price * self.quantity(*id) as f64)
            })
            .sum()
    }

    /// 定时下单按钮只对有 can_schedule_order 的用户出现
    pub fn can_schedule(&self) -> bool {
        is_visible(&self.authority, &Permission::CanScheduleOrder)
    }

    /// 本地校验并组装请求；数量为 n 的菜品 id 重复 n 次
    pub fn build_order(&self, now: NaiveDateTime) -> Result<CreateOrder> {
        if self.selected.is_empty() {
            return Err(ClientError::Validation(EMPTY_SELECTION.to_string()));
        }

        let dish_ids = self
            .selected
            .iter()
            .flat_map(|id| std::iter::repeat_n(*id, self.quantity(*id) as usize))
            .collect();

        let scheduled_for = if self.is_scheduled {
            let Some(at) = self.scheduled_for else {
                return Err(ClientError::Validation(MISSING_SCHEDULE.to_string()));
            };
            if at <= now {
                return Err(ClientError::Validation(PAST_SCHEDULE.to_string()));
            }
            Some(at)
        } else {
            None
        };

        Ok(CreateOrder {
            dish_ids,
            scheduled_for,
        })
    }

    pub async fn submit(&mut self) -> Result<Order> {
        self.submit_at(Local::now().naive_local()).await
    }

    pub async fn submit_at(&mut self, now: NaiveDateTime) -> Result<Order> {
        let request = match self.build_order(now) {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.notice("creating order"));
                return Err(e);
            }
        };

        let api = self.authority.api();
        let result = if request.scheduled_for.is_some() {
            OrderOperations::schedule(api, &request).await
        } else {
            OrderOperations::place(api, &request).await
        };

        match result {
            Ok(order) => {
                tracing::info!("Order {} created", order.id);
                // 立即刷新订单列表，不影响轮询周期
                self.feed.trigger_refresh();
                let message = format!(
                    "Order {} successfully!",
                    if self.is_scheduled { "scheduled" } else { "placed" }
                );
                self.authority
                    .navigator()
                    .navigate(Navigation::to(DEFAULT_ROUTE).with_notice(message.clone()));
                self.notice = Some(message);
                Ok(order)
            }
            Err(e) => {
                tracing::error!("Error creating order: {}", e);
                self.notice = Some(e.notice("creating order"));
                Err(e)
            }
        }
    }

    pub fn cancel(&self) {
        self.authority
            .navigator()
            .navigate(Navigation::to(DEFAULT_ROUTE));
    }
}
