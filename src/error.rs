use reqwest::StatusCode;
use thiserror::Error;

use crate::session::Permission;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 登录返回 401
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An error occurred during login")]
    AuthenticationFailed,
    #[error("You do not have permission to access this page")]
    PermissionDenied { permission: Permission },
    /// 本地校验失败，请求不会发出
    #[error("{0}")]
    Validation(String),
    /// 后端业务规则拒绝（400 等）
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// 给界面展示的提示文本
    pub fn notice(&self, action: &str) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            ClientError::PermissionDenied { .. }
            | ClientError::InvalidCredentials
            | ClientError::AuthenticationFailed => self.to_string(),
            other => format!("Error {}: {}", action, other),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::DuplicateEmail => Some(StatusCode::CONFLICT),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_notice_is_message_only() {
        let err = ClientError::Validation("Please select at least one dish".into());
        assert_eq!(err.notice("creating order"), "Please select at least one dish");
    }

    #[test]
    fn rejected_notice_names_action() {
        let err = ClientError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "Order cannot be canceled".into(),
        };
        assert_eq!(
            err.notice("canceling order"),
            "Error canceling order: Order cannot be canceled"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }
}
