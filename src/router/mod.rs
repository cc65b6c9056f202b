// 客户端路由：路由表、守卫和导航信号

pub mod guard;
pub mod navigator;

use std::collections::HashMap;
use std::sync::Arc;

pub use guard::{DENIED_NOTICE, GuardDecision, check};
pub use navigator::{Navigation, Navigator};

use crate::session::{Permission, SessionAuthority};

pub const LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_ROUTE: &str = "/orders";

/// 可挂载的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    UserList,
    UserAdd,
    UserEdit,
    OrderList,
    OrderCreate,
    ErrorList,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub screen: Screen,
    /// None 表示公开页面
    pub required: Option<Permission>,
}

pub const ROUTES: [RouteDef; 7] = [
    RouteDef {
        pattern: "/login",
        screen: Screen::Login,
        required: None,
    },
    RouteDef {
        pattern: "/users",
        screen: Screen::UserList,
        required: Some(Permission::CanReadUsers),
    },
    RouteDef {
        pattern: "/users/add",
        screen: Screen::UserAdd,
        required: Some(Permission::CanCreateUsers),
    },
    RouteDef {
        pattern: "/users/edit/:id",
        screen: Screen::UserEdit,
        required: Some(Permission::CanUpdateUsers),
    },
    RouteDef {
        pattern: "/orders",
        screen: Screen::OrderList,
        required: Some(Permission::CanSearchOrder),
    },
    RouteDef {
        pattern: "/orders/create",
        screen: Screen::OrderCreate,
        required: Some(Permission::CanPlaceOrder),
    },
    RouteDef {
        pattern: "/errors",
        screen: Screen::ErrorList,
        required: Some(Permission::CanSearchOrder),
    },
];

/// 路径匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub screen: Screen,
    pub required: Option<Permission>,
    pub params: HashMap<String, String>,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// 匹配路由表；空路径按默认页处理，查询串不参与匹配
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split('?').next().unwrap_or_default();
    let path = if segments(path).is_empty() {
        DEFAULT_ROUTE
    } else {
        path
    };
    let actual = segments(path);

    ROUTES.iter().find_map(|route| {
        let expected = segments(route.pattern);
        if expected.len() != actual.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (pattern, value) in expected.iter().zip(actual.iter()) {
            match pattern.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), value.to_string());
                }
                None if pattern == value => {}
                None => return None,
            }
        }
        Some(RouteMatch {
            screen: route.screen,
            required: route.required,
            params,
        })
    })
}

/// 导航的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Mounted(RouteMatch),
    Redirected(Navigation),
    NotFound,
}

/// 把守卫接到导航上：每次进入页面前同步检查
#[derive(Clone)]
pub struct Router {
    authority: Arc<SessionAuthority>,
}

impl Router {
    pub fn new(authority: Arc<SessionAuthority>) -> Self {
        Self { authority }
    }

    pub fn navigate(&self, path: &str) -> RouteOutcome {
        let Some(matched) = resolve(path) else {
            tracing::warn!("No route for {}", path);
            return RouteOutcome::NotFound;
        };

        if matched.required.is_none() {
            self.authority.navigator().navigate(Navigation::to(path));
            return RouteOutcome::Mounted(matched);
        }

        let navigation = match check(&self.authority, path, matched.required) {
            GuardDecision::Proceed => {
                self.authority.navigator().navigate(Navigation::to(path));
                return RouteOutcome::Mounted(matched);
            }
            GuardDecision::RedirectToLogin { return_url } => {
                // 令牌过期视为会话结束
                if self.authority.has_stale_token() {
                    self.authority.end_session();
                }
                Navigation::to(LOGIN_ROUTE).with_return_url(return_url)
            }
            GuardDecision::Denied {
                redirect, notice, ..
            } => {
                let landing = resolve(&redirect)
                    .map(|m| check(&self.authority, &redirect, m.required).is_proceed())
                    .unwrap_or(false);
                if landing {
                    Navigation::to(redirect).with_notice(notice)
                } else {
                    // 默认页本身也无权访问时没有安全的落脚点，强制登出
                    tracing::warn!("Default route {} denied as well, signing out", redirect);
                    self.authority.end_session();
                    Navigation::to(LOGIN_ROUTE).with_notice(notice)
                }
            }
        };

        self.authority.navigator().navigate(navigation.clone());
        RouteOutcome::Redirected(navigation)
    }
}
