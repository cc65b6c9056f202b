use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::permission::Permission;
use super::token;
use crate::api::ApiClient;
use crate::api::models::User;
use crate::api::operations::AuthOperations;
use crate::error::Result;
use crate::router::{DEFAULT_ROUTE, LOGIN_ROUTE, Navigation, Navigator};
use crate::storage::{SESSION_KEYS, SessionStore, TOKEN_KEY, USER_KEY};

/// 已登录会话：令牌与用户记录必须同时存在
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// 窗口关闭方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseKind {
    /// 重新加载，保留会话
    Reload,
    /// 正常关闭，清空本地存储
    Exit,
}

/// 会话与权限的唯一持有者
///
/// 权限判断每次都从持久化存储重新读取，不做缓存；
/// 当前用户的变化通过 watch 通道通知视图。
pub struct SessionAuthority {
    store: Arc<dyn SessionStore>,
    api: ApiClient,
    navigator: Navigator,
    current: watch::Sender<Option<User>>,
}

impl SessionAuthority {
    pub fn new(store: Arc<dyn SessionStore>, api: ApiClient, navigator: Navigator) -> Self {
        let persisted = read_session(store.as_ref()).map(|s| s.user);
        let (current, _rx) = watch::channel(persisted);
        let authority = Self {
            store,
            api,
            navigator,
            current,
        };
        authority.validate_persisted();
        authority
    }

    // 启动时发现令牌已过期则直接登出
    fn validate_persisted(&self) {
        if let Ok(Some(token)) = self.store.get(TOKEN_KEY) {
            if token::is_expired_at(&token, Utc::now()) {
                tracing::info!("Persisted token expired, signing out");
                self.logout();
            }
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// 登录成功后一次性写入令牌和用户记录，并导航到默认页面
    ///
    /// 登录失败时不会改动已有会话。
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let response = AuthOperations::login(&self.api, email, password).await?;

        let user_json = serde_json::to_string(&response.user)?;
        self.store
            .set_all(&[(TOKEN_KEY, response.jwt.as_str()), (USER_KEY, user_json.as_str())])?;
        self.current.send_replace(Some(response.user.clone()));

        if response.user.permissions.is_empty() {
            tracing::warn!("User {} has no permissions assigned", response.user.email);
        }
        tracing::info!("User {} signed in", response.user.email);

        self.navigator.navigate(Navigation::to(DEFAULT_ROUTE));
        Ok(response.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => token::is_valid_at(&token, now),
            _ => false,
        }
    }

    /// 存储中有令牌但已失效
    pub fn has_stale_token(&self) -> bool {
        matches!(self.store.get(TOKEN_KEY), Ok(Some(_))) && !self.is_authenticated()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.session()
            .map(|s| s.user.has_permission(permission))
            .unwrap_or(false)
    }

    /// 从存储读取完整会话，缺任何一半都视为没有会话
    pub fn session(&self) -> Option<Session> {
        read_session(self.store.as_ref())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// 编辑的是当前用户时，整体改写持久化的用户记录
    ///
    /// 返回是否改写了会话。
    pub fn refresh_user(&self, updated: &User) -> Result<bool> {
        let Some(session) = self.session() else {
            return Ok(false);
        };
        if session.user.id != updated.id {
            return Ok(false);
        }

        let user_json = serde_json::to_string(updated)?;
        self.store.set(USER_KEY, &user_json)?;
        self.current.send_replace(Some(updated.clone()));
        tracing::info!("Session refreshed for user {}", updated.email);
        Ok(true)
    }

    /// 清空会话但不导航
    pub fn end_session(&self) {
        if let Err(e) = self.store.remove_all(&SESSION_KEYS) {
            tracing::error!("Failed to clear session storage: {}", e);
        }
        self.current.send_replace(None);
    }

    pub fn logout(&self) {
        self.end_session();
        self.navigator.navigate(Navigation::to(LOGIN_ROUTE));
    }

    pub fn close(&self, kind: CloseKind) {
        if kind == CloseKind::Reload {
            return;
        }
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear storage on close: {}", e);
        }
        self.current.send_replace(None);
    }
}

fn read_session(store: &dyn SessionStore) -> Option<Session> {
    let token = store.get(TOKEN_KEY).ok().flatten()?;
    let raw_user = store.get(USER_KEY).ok().flatten()?;
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(Session { token, user }),
        Err(e) => {
            tracing::warn!("Discarding unreadable user record: {}", e);
            None
        }
    }
}
