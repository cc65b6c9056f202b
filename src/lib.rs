use std::sync::Arc;

use config::Config;
use error::Result;
use feed::OrderFeed;
use router::{Navigator, Router};
use session::SessionAuthority;
use storage::{FileStore, MemoryStore, SessionStore};

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod router;
pub mod session;
pub mod storage;
pub mod views;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

/// 客户端上下文：会话、路由和订单订阅都在这里显式持有
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub authority: Arc<SessionAuthority>,
    pub router: Router,
    pub feed: Arc<OrderFeed>,
}

impl AppState {
    /// 按配置选择存储并启动订单轮询，必须在 tokio 运行时中调用
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(FileStore::new(path.clone())),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let api = api::ApiClient::new(&config, store.clone())?;
        let authority = Arc::new(SessionAuthority::new(store, api.clone(), Navigator::new()));
        let router = Router::new(authority.clone());
        let feed = Arc::new(OrderFeed::spawn(Arc::new(api), config.poll_interval()));

        Ok(AppState {
            config,
            authority,
            router,
            feed,
        })
    }
}
