use std::sync::Arc;

use crate::api::models::User;
use crate::error::{ClientError, Result};
use crate::router::{DEFAULT_ROUTE, Navigation};
use crate::session::SessionAuthority;

pub struct LoginView {
    authority: Arc<SessionAuthority>,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginView {
    /// 已登录时直接离开登录页
    pub fn mount(authority: Arc<SessionAuthority>) -> Self {
        if authority.is_authenticated() {
            authority.navigator().navigate(Navigation::to(DEFAULT_ROUTE));
        }
        Self {
            authority,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub async fn submit(&mut self) -> Result<User> {
        // 已登录时不再重复认证
        if self.authority.is_authenticated() {
            if let Some(session) = self.authority.session() {
                self.authority
                    .navigator()
                    .navigate(Navigation::to(DEFAULT_ROUTE));
                return Ok(session.user);
            }
        }

        if self.email.trim().is_empty() || self.password.is_empty() {
            let err = ClientError::Validation("Please enter both email and password".into());
            self.error = Some(err.notice("signing in"));
            return Err(err);
        }

        match self.authority.authenticate(self.email.trim(), &self.password).await {
            Ok(user) => {
                self.error = None;
                Ok(user)
            }
            Err(e) => {
                self.error = Some(e.notice("signing in"));
                Err(e)
            }
        }
    }
}
