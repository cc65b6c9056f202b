use tokio::sync::watch;

/// 一次导航请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    /// 登录成功后应返回的地址
    pub return_url: Option<String>,
    /// 需要展示给用户的提示
    pub notice: Option<String>,
}

impl Navigation {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            return_url: None,
            notice: None,
        }
    }

    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// 导航信号通道，保存最近一次导航
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: watch::Sender<Option<Navigation>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn navigate(&self, navigation: Navigation) {
        tracing::debug!("Navigating to {}", navigation.path);
        self.tx.send_replace(Some(navigation));
    }

    pub fn current(&self) -> Option<Navigation> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Navigation>> {
        self.tx.subscribe()
    }
}
