use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::api::ApiClient;
use crate::api::models::User;
use crate::config::Config;
use crate::router::Navigator;
use crate::session::token::tests::issue;
use crate::session::{Permission, SessionAuthority};
use crate::storage::{MemoryStore, SessionStore, TOKEN_KEY, USER_KEY};

pub(crate) fn user(id: i64, permissions: &[Permission]) -> User {
    User {
        id,
        first_name: "Pera".to_string(),
        last_name: "Peric".to_string(),
        email: format!("user{}@raf.rs", id),
        permissions: permissions.iter().map(|p| p.as_str().to_string()).collect(),
    }
}

pub(crate) fn persist(store: &MemoryStore, token: &str, user: &User) {
    let user_json = serde_json::to_string(user).unwrap();
    store
        .set_all(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
        .unwrap();
}

fn build(store: Arc<MemoryStore>) -> Arc<SessionAuthority> {
    let api = ApiClient::new(&Config::default(), store.clone()).unwrap();
    Arc::new(SessionAuthority::new(store, api, Navigator::new()))
}

pub(crate) fn signed_out_authority() -> (Arc<SessionAuthority>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build(store.clone()), store)
}

pub(crate) fn authority_with_session(
    id: i64,
    permissions: &[Permission],
) -> (Arc<SessionAuthority>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    persist(&store, &issue(Utc::now() + Duration::hours(1)), &user(id, permissions));
    (build(store.clone()), store)
}

/// 令牌在会话建立之后才过期
pub(crate) fn expired_authority() -> (Arc<SessionAuthority>, Arc<MemoryStore>) {
    let (authority, store) = signed_out_authority();
    persist(
        &store,
        &issue(Utc::now() - Duration::minutes(1)),
        &user(1, &Permission::ALL),
    );
    (authority, store)
}
