//! 按权限决定界面元素是否渲染
//!
//! 条件不满足时元素整体不出现，而不是显示成禁用状态。
//! 会话变化（例如修改了自己的权限）后需要重新求值，见 [`GatedView`]。

use tokio::sync::watch;

use crate::api::models::User;
use crate::session::{Permission, SessionAuthority};

/// 渲染条件：当前用户到布尔值的纯函数
pub trait RenderCondition {
    fn is_met(&self, user: Option<&User>) -> bool;
}

impl RenderCondition for Permission {
    fn is_met(&self, user: Option<&User>) -> bool {
        user.is_some_and(|u| u.has_permission(*self))
    }
}

impl<F> RenderCondition for F
where
    F: Fn(Option<&User>) -> bool,
{
    fn is_met(&self, user: Option<&User>) -> bool {
        self(user)
    }
}

/// 所有权限都具备
pub struct AllOf(pub Vec<Permission>);

impl RenderCondition for AllOf {
    fn is_met(&self, user: Option<&User>) -> bool {
        self.0.iter().all(|p| p.is_met(user))
    }
}

/// 任一权限具备
pub struct AnyOf(pub Vec<Permission>);

impl RenderCondition for AnyOf {
    fn is_met(&self, user: Option<&User>) -> bool {
        self.0.iter().any(|p| p.is_met(user))
    }
}

/// 按持久化会话求值；与 has_permission 一样每次重新读取
pub fn is_visible(authority: &SessionAuthority, condition: &dyn RenderCondition) -> bool {
    let session = authority.session();
    condition.is_met(session.as_ref().map(|s| &s.user))
}

/// 条件满足时才生成内容
pub fn render_if<T>(
    authority: &SessionAuthority,
    condition: &dyn RenderCondition,
    render: impl FnOnce() -> T,
) -> Option<T> {
    if is_visible(authority, condition) {
        Some(render())
    } else {
        None
    }
}

/// 受条件控制的元素，随会话变化重新求值
pub struct GatedView<C> {
    condition: C,
    rx: watch::Receiver<Option<User>>,
    visible: bool,
}

impl<C: RenderCondition> GatedView<C> {
    pub fn new(authority: &SessionAuthority, condition: C) -> Self {
        let mut rx = authority.subscribe();
        let visible = condition.is_met(rx.borrow_and_update().as_ref());
        Self {
            condition,
            rx,
            visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// 等待下一次会话变化并重新求值；返回新的可见性，会话源关闭时返回 None
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        self.visible = self.condition.is_met(self.rx.borrow_and_update().as_ref());
        Some(self.visible)
    }

    /// 不等待，处理已经到达的变化
    pub fn poll_update(&mut self) -> bool {
        if self.rx.has_changed().unwrap_or(false) {
            self.visible = self.condition.is_met(self.rx.borrow_and_update().as_ref());
        }
        self.visible
    }
}
