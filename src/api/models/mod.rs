// API 数据传输对象模块
// 与后端交互的数据结构，字段统一使用 camelCase

pub mod auth;
pub mod common;
pub mod dish;
pub mod error_message;
pub mod order;
pub mod user;

pub use auth::*;
pub use common::*;
pub use dish::*;
pub use error_message::*;
pub use order::*;
pub use user::*;
