// 后端 API 访问层

pub mod client;
pub mod models;
pub mod operations;

pub use client::ApiClient;
