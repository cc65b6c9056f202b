use std::sync::Arc;

use crate::api::models::{Order, OrderSearch, User};
use crate::api::operations::{OrderOperations, UserOperations};
use crate::error::{ClientError, Result};
use crate::feed::{OrderFeed, Subscription};
use crate::session::{Permission, SessionAuthority};
use crate::visibility::is_visible;

pub const CANCEL_NOT_ALLOWED: &str = "Can only cancel orders in ORDERED status";

/// 订单列表上按权限出现的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderListAffordances {
    pub cancel: bool,
    pub track: bool,
    pub place_order: bool,
    /// 管理员可按用户筛选
    pub filter_by_user: bool,
}

pub struct OrderListView {
    authority: Arc<SessionAuthority>,
    subscription: Subscription,
    pub orders: Vec<Order>,
    pub criteria: OrderSearch,
    pub users: Vec<User>,
    pub is_admin: bool,
    pub notice: Option<String>,
}

impl OrderListView {
    pub fn mount(authority: Arc<SessionAuthority>, feed: &OrderFeed) -> Self {
        let is_admin = authority.has_permission(Permission::CanReadUsers);
        Self {
            authority,
            subscription: feed.subscribe(),
            orders: Vec::new(),
            criteria: OrderSearch::default(),
            users: Vec::new(),
            is_admin,
            notice: None,
        }
    }

    /// 首次加载：管理员额外加载用户列表用于筛选
    pub async fn init(&mut self) -> Result<()> {
        if self.is_admin {
            match UserOperations::list(self.authority.api()).await {
                Ok(users) => self.users = users,
                Err(e) => tracing::error!("Error loading users: {}", e),
            }
        }
        self.load_orders().await
    }

    pub async fn load_orders(&mut self) -> Result<()> {
        match OrderOperations::search(self.authority.api(), &self.criteria).await {
            Ok(orders) => {
                tracing::debug!("LoadOrders - received orders: {}", orders.len());
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading orders: {}", e);
                self.notice = Some(e.notice("loading orders"));
                Err(e)
            }
        }
    }

    pub async fn clear_filters(&mut self) -> Result<()> {
        self.criteria = OrderSearch::default();
        self.load_orders().await
    }

    /// 应用已经到达的轮询快照，不等待；每个快照只应用一次
    pub fn apply_updates(&mut self) -> bool {
        match self.subscription.take_update() {
            Some(snapshot) => {
                self.orders = snapshot.orders.clone();
                true
            }
            None => false,
        }
    }

    /// 等待下一次轮询快照并整体替换当前列表
    pub async fn next_update(&mut self) -> bool {
        match self.subscription.next().await {
            Some(snapshot) => {
                self.orders = snapshot.orders.clone();
                true
            }
            None => false,
        }
    }

    /// 只有 ORDERED 状态可以取消，否则不发请求
    pub async fn cancel(&mut self, order: &Order) -> Result<String> {
        if !order.status.is_initial() {
            let err = ClientError::Validation(CANCEL_NOT_ALLOWED.to_string());
            self.notice = Some(err.notice("canceling order"));
            return Err(err);
        }

        match OrderOperations::cancel(self.authority.api(), order.id).await {
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "Order canceled successfully".to_string());
                tracing::info!("Order {} canceled", order.id);
                if let Err(e) = self.load_orders().await {
                    tracing::warn!("Reload after canceling order {} failed: {}", order.id, e);
                }
                // 取消已经成功，提示不被刷新失败覆盖
                self.notice = Some(message.clone());
                Ok(message)
            }
            Err(e) => {
                tracing::error!("Error canceling order: {}", e);
                self.notice = Some(e.notice("canceling order"));
                Err(e)
            }
        }
    }

    pub async fn track(&mut self, order: &Order) -> Result<Order> {
        match OrderOperations::track(self.authority.api(), order.id).await {
            Ok(tracked) => {
                self.notice = Some(format!(
                    "Order Status: {}\nLast Updated: {}",
                    tracked.status,
                    tracked.status_updated_at.format("%Y-%m-%d %H:%M:%S")
                ));
                Ok(tracked)
            }
            Err(e) => {
                tracing::error!("Error tracking order: {}", e);
                self.notice = Some(e.notice("tracking order"));
                Err(e)
            }
        }
    }

    pub fn affordances(&self) -> OrderListAffordances {
        let authority = self.authority.as_ref();
        OrderListAffordances {
            cancel: is_visible(authority, &Permission::CanCancelOrder),
            track: is_visible(authority, &Permission::CanTrackOrder),
            place_order: is_visible(authority, &Permission::CanPlaceOrder),
            filter_by_user: is_visible(authority, &Permission::CanReadUsers),
        }
    }

    /// 卸载页面即退订，已发出的请求照常完成
    pub fn unmount(self) {
        self.subscription.release();
    }
}
