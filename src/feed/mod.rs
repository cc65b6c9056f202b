//! 订单轮询订阅
//!
//! 固定间隔拉取一次完整订单列表，整体替换后发布给所有订阅者。
//! 订阅者的加入和退出不影响计时器；手动刷新只是额外插入的一次拉取。
//! 请求之间可以重叠，最后返回的结果覆盖先前的结果。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::api::ApiClient;
use crate::api::models::{Order, OrderSearch};
use crate::api::operations::OrderOperations;
use crate::error::Result;

/// 订单数据来源
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn search(&self, criteria: &OrderSearch) -> Result<Vec<Order>>;
}

#[async_trait]
impl OrderSource for ApiClient {
    async fn search(&self, criteria: &OrderSearch) -> Result<Vec<Order>> {
        OrderOperations::search(self, criteria).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOrigin {
    Tick,
    Manual,
}

/// 一次拉取得到的完整订单集合，发布后不再修改
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub orders: Vec<Order>,
    pub fetched_at: DateTime<Utc>,
    pub origin: RefreshOrigin,
}

type Shared = Option<Arc<OrderSnapshot>>;

struct FeedInner {
    source: Arc<dyn OrderSource>,
    tx: watch::Sender<Shared>,
}

impl FeedInner {
    async fn fetch_and_publish(&self, origin: RefreshOrigin) {
        let orders = match self.source.search(&OrderSearch::default()).await {
            Ok(orders) => orders,
            Err(e) => {
                // 失败只记录，保留上一次的快照
                tracing::error!("Error polling orders ({:?}): {}", origin, e);
                return;
            }
        };

        if self.tx.receiver_count() == 0 {
            tracing::debug!("Dropping order snapshot, no subscribers");
            return;
        }

        tracing::debug!(
            "Order update ({:?}) - found orders: {}, {:?}",
            origin,
            orders.len(),
            orders.iter().map(|o| (o.id, o.status)).collect::<Vec<_>>()
        );
        self.tx.send_replace(Some(Arc::new(OrderSnapshot {
            orders,
            fetched_at: Utc::now(),
            origin,
        })));
    }
}

pub struct OrderFeed {
    inner: Arc<FeedInner>,
    ticker: JoinHandle<()>,
    period: Duration,
}

impl OrderFeed {
    /// 创建后即开始计时，第一次拉取发生在一个周期之后
    ///
    /// 必须在 tokio 运行时中调用。
    pub fn spawn(source: Arc<dyn OrderSource>, period: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        let inner = Arc::new(FeedInner { source, tx });

        let ticking = inner.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let inner = ticking.clone();
                // 不等待上一次请求，允许重叠
                tokio::spawn(async move {
                    inner.fetch_and_publish(RefreshOrigin::Tick).await;
                });
            }
        });

        tracing::info!("Order feed started, polling every {:?}", period);
        Self {
            inner,
            ticker,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.inner.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.tx.receiver_count()
    }

    pub fn latest(&self) -> Option<Arc<OrderSnapshot>> {
        self.inner.tx.borrow().clone()
    }

    /// 立即额外拉取一次，不重置周期
    pub fn trigger_refresh(&self) -> JoinHandle<()> {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            inner.fetch_and_publish(RefreshOrigin::Manual).await;
        })
    }

    pub fn shutdown(&self) {
        self.ticker.abort();
    }
}

impl Drop for OrderFeed {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// 订阅句柄，drop 即退订
pub struct Subscription {
    rx: watch::Receiver<Shared>,
}

impl Subscription {
    /// 等待下一次发布；订阅源关闭后返回 None
    pub async fn next(&mut self) -> Option<Arc<OrderSnapshot>> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// 最近一次发布的快照，只查看，不标记为已读
    pub fn latest(&self) -> Option<Arc<OrderSnapshot>> {
        self.rx.borrow().clone()
    }

    /// 取走尚未处理的新快照，不等待；同一次发布只会取到一次
    pub fn take_update(&mut self) -> Option<Arc<OrderSnapshot>> {
        if !self.has_update() {
            return None;
        }
        self.rx.borrow_and_update().clone()
    }

    pub fn has_update(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn release(self) {}
}
