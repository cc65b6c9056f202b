use super::DEFAULT_ROUTE;
use crate::session::{Permission, SessionAuthority};

pub const DENIED_NOTICE: &str = "You do not have permission to access this page";

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 已登录且权限满足
    Proceed,
    /// 未登录：跳转登录页，记住原目标
    RedirectToLogin { return_url: String },
    /// 已登录但缺少权限
    Denied {
        redirect: String,
        permission: Permission,
        notice: String,
    },
}

/// 挂载受保护页面前的同步检查，不发起任何网络请求
pub fn check(
    authority: &SessionAuthority,
    target: &str,
    required: Option<Permission>,
) -> GuardDecision {
    if !authority.is_authenticated() {
        return GuardDecision::RedirectToLogin {
            return_url: target.to_string(),
        };
    }

    match required {
        Some(permission) if !authority.has_permission(permission) => {
            tracing::warn!("Access to {} denied, missing {}", target, permission);
            GuardDecision::Denied {
                redirect: DEFAULT_ROUTE.to_string(),
                permission,
                notice: DENIED_NOTICE.to_string(),
            }
        }
        _ => GuardDecision::Proceed,
    }
}

impl GuardDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, GuardDecision::Proceed)
    }
}
