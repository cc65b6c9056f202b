// API 操作模块
// 每个资源一组无状态操作，统一通过 ApiClient 发送

pub mod auth;
pub mod dish;
pub mod error_message;
pub mod order;
pub mod user;

pub use auth::AuthOperations;
pub use dish::DishOperations;
pub use error_message::ErrorMessageOperations;
pub use order::OrderOperations;
pub use user::UserOperations;
