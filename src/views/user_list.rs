use std::sync::Arc;

use crate::api::models::User;
use crate::api::operations::UserOperations;
use crate::error::{ClientError, Result};
use crate::router::Navigation;
use crate::session::{Permission, SessionAuthority};
use crate::visibility::is_visible;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserListAffordances {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

pub struct UserListView {
    authority: Arc<SessionAuthority>,
    pub users: Vec<User>,
    pub current_user_id: Option<i64>,
    pub notice: Option<String>,
}

impl UserListView {
    /// 没有 can_read_users 时强制登出
    pub fn mount(authority: Arc<SessionAuthority>) -> Result<Self> {
        if !authority.has_permission(Permission::CanReadUsers) {
            tracing::warn!("User list opened without can_read_users, signing out");
            authority.logout();
            return Err(ClientError::PermissionDenied {
                permission: Permission::CanReadUsers,
            });
        }

        let current_user_id = authority.session().map(|s| s.user.id);
        Ok(Self {
            authority,
            users: Vec::new(),
            current_user_id,
            notice: None,
        })
    }

    pub async fn load(&mut self) -> Result<()> {
        match UserOperations::list(self.authority.api()).await {
            Ok(users) => {
                self.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading users: {}", e);
                self.notice = Some(e.notice("loading users"));
                Err(e)
            }
        }
    }

    pub fn affordances(&self) -> UserListAffordances {
        let authority = self.authority.as_ref();
        UserListAffordances {
            create: is_visible(authority, &Permission::CanCreateUsers),
            update: is_visible(authority, &Permission::CanUpdateUsers),
            delete: is_visible(authority, &Permission::CanDeleteUsers),
        }
    }

    pub fn edit(&self, user_id: i64) {
        self.authority
            .navigator()
            .navigate(Navigation::to(format!("/users/edit/{}", user_id)));
    }

    /// 删除自己或删空列表后会话随之结束
    pub async fn delete(&mut self, user_id: i64) -> Result<()> {
        if let Err(e) = UserOperations::delete(self.authority.api(), user_id).await {
            tracing::error!("Error deleting user {}: {}", user_id, e);
            self.notice = Some(e.notice("deleting user"));
            return Err(e);
        }

        self.users.retain(|u| u.id != user_id);
        if self.users.is_empty() || Some(user_id) == self.current_user_id {
            tracing::info!("Deleted user {} ends the current session", user_id);
            self.authority.logout();
        }
        Ok(())
    }
}
