// 会话与权限
// 令牌、用户记录和权限判断都集中在 SessionAuthority

pub mod authority;
pub mod permission;
pub mod token;

pub use authority::{CloseKind, Session, SessionAuthority};
pub use permission::{Permission, UnknownPermission};
