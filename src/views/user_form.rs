use std::sync::Arc;

use crate::api::models::{CreateUser, User};
use crate::api::operations::UserOperations;
use crate::error::{ClientError, Result};
use crate::router::Navigation;
use crate::session::{Permission, SessionAuthority};

use super::toggle_permission;

pub const FIELDS_REQUIRED: &str = "All fields are required!";
pub const PERMISSION_REQUIRED: &str = "At least one permission is required!";

const USERS_ROUTE: &str = "/users";

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_new(user: &CreateUser) -> Result<()> {
    if blank(&user.first_name) || blank(&user.last_name) || blank(&user.email) || blank(&user.password)
    {
        return Err(ClientError::Validation(FIELDS_REQUIRED.to_string()));
    }
    if user.permissions.is_empty() {
        return Err(ClientError::Validation(PERMISSION_REQUIRED.to_string()));
    }
    Ok(())
}

pub fn validate_existing(user: &User) -> Result<()> {
    if blank(&user.first_name) || blank(&user.last_name) || blank(&user.email) {
        return Err(ClientError::Validation(FIELDS_REQUIRED.to_string()));
    }
    if user.permissions.is_empty() {
        return Err(ClientError::Validation(PERMISSION_REQUIRED.to_string()));
    }
    Ok(())
}

pub struct UserAddView {
    authority: Arc<SessionAuthority>,
    pub user: CreateUser,
    pub error_message: Option<String>,
}

impl UserAddView {
    pub fn mount(authority: Arc<SessionAuthority>) -> Self {
        Self {
            authority,
            user: CreateUser::default(),
            error_message: None,
        }
    }

    pub fn set_permission(&mut self, permission: Permission, checked: bool) {
        toggle_permission(&mut self.user.permissions, permission, checked);
    }

    pub async fn submit(&mut self) -> Result<User> {
        if let Err(e) = validate_new(&self.user) {
            self.error_message = Some(e.notice("adding user"));
            return Err(e);
        }

        match UserOperations::add(self.authority.api(), &self.user).await {
            Ok(created) => {
                tracing::info!("User {} created", created.email);
                self.error_message = None;
                self.authority
                    .navigator()
                    .navigate(Navigation::to(USERS_ROUTE));
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Error adding user: {}", e);
                self.error_message = Some(format!("Error adding user: {}", e));
                Err(e)
            }
        }
    }
}

pub struct UserEditView {
    authority: Arc<SessionAuthority>,
    pub user: User,
    pub error_message: Option<String>,
}

impl UserEditView {
    /// 从列表页带过来的用户直接编辑
    pub fn with_user(authority: Arc<SessionAuthority>, user: User) -> Self {
        Self {
            authority,
            user,
            error_message: None,
        }
    }

    pub async fn load(authority: Arc<SessionAuthority>, user_id: i64) -> Result<Self> {
        let user = UserOperations::get(authority.api(), user_id).await?;
        Ok(Self::with_user(authority, user))
    }

    pub fn set_permission(&mut self, permission: Permission, checked: bool) {
        toggle_permission(&mut self.user.permissions, permission, checked);
    }

    /// 编辑的是自己时同步刷新会话，权限变化立即生效
    pub async fn submit(&mut self) -> Result<User> {
        if let Err(e) = validate_existing(&self.user) {
            self.error_message = Some(e.notice("updating user"));
            return Err(e);
        }

        match UserOperations::update(self.authority.api(), &self.user).await {
            Ok(updated) => {
                // 后端已经更新，本地会话写不进去时也要让用户看到
                if let Err(e) = self.authority.refresh_user(&updated) {
                    tracing::error!("User {} updated but session refresh failed: {}", updated.id, e);
                    self.error_message = Some(e.notice("refreshing session"));
                    return Err(e);
                }
                self.error_message = None;
                self.authority
                    .navigator()
                    .navigate(Navigation::to(USERS_ROUTE));
                Ok(updated)
            }
            Err(e) => {
                tracing::error!("Error updating user: {}", e);
                self.error_message = Some(format!("Error updating user: {}", e));
                Err(e)
            }
        }
    }
}
