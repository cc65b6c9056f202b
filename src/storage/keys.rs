/// 令牌存储键
pub const TOKEN_KEY: &str = "token";

/// 用户记录存储键
pub const USER_KEY: &str = "user";

/// 会话涉及的全部键
pub const SESSION_KEYS: [&str; 2] = [TOKEN_KEY, USER_KEY];
