// 本地持久化存储
// 会话只使用 token 和 user 两个键

pub mod file;
pub mod keys;
pub mod memory;

pub use file::FileStore;
pub use keys::{SESSION_KEYS, TOKEN_KEY, USER_KEY};
pub use memory::MemoryStore;

use crate::error::Result;

/// 键值存储，语义上对应浏览器的 localStorage
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// 清空所有键
    fn clear(&self) -> Result<()>;

    /// 一次写入多个键，实现方应保证不会留下写了一半的状态
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// 一次删除多个键
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
