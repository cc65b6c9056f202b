#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{Duration, NaiveDateTime, Utc};
use food_client::{
    AppState,
    api::models::{
        CreateOrder, CreateUser, Dish, ErrorMessage, JwtResponse, LoginRequest, Order, OrderSearch,
        OrderStatus, User,
    },
    config::Config,
    session::Permission,
    storage::MemoryStore,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Deserialize;
use serde_json::json;

pub const ADMIN_EMAIL: &str = "admin@raf.rs";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const CUSTOMER_EMAIL: &str = "user@raf.rs";
pub const CUSTOMER_PASSWORD: &str = "user123";

pub fn admin_permissions() -> Vec<Permission> {
    Permission::ALL.to_vec()
}

pub fn customer_permissions() -> Vec<Permission> {
    vec![
        Permission::CanSearchOrder,
        Permission::CanPlaceOrder,
        Permission::CanTrackOrder,
        Permission::CanScheduleOrder,
    ]
}

pub fn issue_token(subject: &str, valid_for: Duration) -> String {
    let claims = json!({
        "sub": subject,
        "exp": (Utc::now() + valid_for).timestamp(),
        "iat": Utc::now().timestamp(),
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn timestamp() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[derive(Default)]
pub struct BackendState {
    pub users: Vec<(User, String)>,
    pub dishes: Vec<Dish>,
    pub orders: Vec<Order>,
    pub errors: Vec<ErrorMessage>,
    /// 每个接口被调用的次数
    pub calls: HashMap<&'static str, usize>,
    pub last_authorization: Option<String>,
    pub paged_errors_supported: bool,
    pub fail_search: bool,
    next_id: i64,
}

impl BackendState {
    fn hit(&mut self, name: &'static str, headers: &HeaderMap) {
        *self.calls.entry(name).or_default() += 1;
        if name != "login" {
            self.last_authorization = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_user(&mut self, email: &str, password: &str, permissions: &[Permission]) -> User {
        let id = self.next_id();
        let user = User {
            id,
            first_name: "Test".to_string(),
            last_name: format!("User{}", id),
            email: email.to_string(),
            permissions: permissions.iter().map(|p| p.as_str().to_string()).collect(),
        };
        self.users.push((user.clone(), password.to_string()));
        user
    }

    pub fn add_order(&mut self, created_by: &User, status: OrderStatus) -> Order {
        let id = self.next_id();
        let order = Order {
            id,
            status,
            created_by_id: created_by.id,
            created_by_name: created_by.full_name(),
            active: true,
            items: self.dishes.iter().take(1).cloned().collect(),
            created_at: timestamp(),
            scheduled_for: None,
            status_updated_at: timestamp(),
        };
        self.orders.push(order.clone());
        order
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let mut backend = BackendState {
            paged_errors_supported: true,
            ..Default::default()
        };
        backend.add_user(ADMIN_EMAIL, ADMIN_PASSWORD, &admin_permissions());
        backend.add_user(CUSTOMER_EMAIL, CUSTOMER_PASSWORD, &customer_permissions());
        for (name, price, category) in [
            ("Pizza", 9.5, "Main"),
            ("Soup", 3.0, "Starter"),
            ("Pasta", 8.0, "Main"),
        ] {
            let id = backend.next_id();
            backend.dishes.push(Dish {
                id,
                name: name.to_string(),
                description: String::new(),
                price,
                category: category.to_string(),
                available: true,
            });
        }

        let state: Shared = Arc::new(Mutex::new(backend));
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/orders", post(place_order))
            .route("/api/orders/search", post(search_orders))
            .route("/api/orders/schedule", post(schedule_order))
            .route("/api/orders/{id}/cancel", put(cancel_order))
            .route("/api/orders/{id}/track", get(track_order))
            .route("/api/users", get(list_users).post(add_user))
            .route(
                "/api/users/{id}",
                get(get_user).put(update_user).delete(delete_user),
            )
            .route("/api/dishes/available", get(available_dishes))
            .route("/api/errors", get(error_page))
            .route("/api/errors/all", get(all_errors))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> Config {
        let mut config = Config::with_base_url(&self.base_url());
        // 测试里用手动刷新，避免周期拉取干扰计数
        config.poll_interval_secs = 3600;
        config
    }

    pub fn client(&self) -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(self.config(), store.clone()).unwrap();
        (state, store)
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut BackendState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn user(&self, email: &str) -> User {
        self.with(|s| {
            s.users
                .iter()
                .find(|(u, _)| u.email == email)
                .map(|(u, _)| u.clone())
                .unwrap()
        })
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "))
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(req): Json<LoginRequest>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("login", &headers);
    match state
        .users
        .iter()
        .find(|(u, p)| u.email == req.email && *p == req.password)
    {
        Some((user, _)) => Json(JwtResponse {
            jwt: issue_token(&user.email, Duration::hours(1)),
            user: user.clone(),
        })
        .into_response(),
        None => (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response(),
    }
}

async fn search_orders(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(criteria): Json<OrderSearch>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("search", &headers);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.fail_search {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    let orders: Vec<Order> = state
        .orders
        .iter()
        .filter(|o| {
            criteria
                .status
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&o.status))
        })
        .filter(|o| criteria.user_id.is_none_or(|id| o.created_by_id == id))
        .cloned()
        .collect();
    Json(orders).into_response()
}

fn create_order(state: &mut BackendState, req: CreateOrder) -> Response {
    let mut items = Vec::new();
    for id in &req.dish_ids {
        match state.dishes.iter().find(|d| d.id == *id) {
            Some(dish) => items.push(dish.clone()),
            None => return (StatusCode::BAD_REQUEST, "Dish not found").into_response(),
        }
    }
    let creator = state.users[0].0.clone();
    let id = state.next_id();
    let order = Order {
        id,
        status: OrderStatus::Ordered,
        created_by_id: creator.id,
        created_by_name: creator.full_name(),
        active: true,
        items,
        created_at: timestamp(),
        scheduled_for: req.scheduled_for,
        status_updated_at: timestamp(),
    };
    state.orders.push(order.clone());
    Json(order).into_response()
}

async fn place_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<CreateOrder>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("place", &headers);
    create_order(&mut state, req)
}

async fn schedule_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<CreateOrder>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("schedule", &headers);
    if req.scheduled_for.is_none() {
        return (StatusCode::BAD_REQUEST, "Scheduled time is required").into_response();
    }
    create_order(&mut state, req)
}

async fn cancel_order(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("cancel", &headers);
    let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Order not found"}))).into_response();
    };
    if order.status != OrderStatus::Ordered {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Order can only be canceled in ORDERED status"})),
        )
            .into_response();
    }
    order.status = OrderStatus::Canceled;
    order.status_updated_at = timestamp();
    Json(json!({"message": "Order canceled successfully"})).into_response()
}

async fn track_order(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("track", &headers);
    match state.orders.iter().find(|o| o.id == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => (StatusCode::BAD_REQUEST, "Order not found").into_response(),
    }
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("list_users", &headers);
    let users: Vec<User> = state.users.iter().map(|(u, _)| u.clone()).collect();
    Json(users).into_response()
}

async fn get_user(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("get_user", &headers);
    match state.users.iter().find(|(u, _)| u.id == id) {
        Some((user, _)) => Json(user.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn add_user(State(state): State<Shared>, headers: HeaderMap, Json(req): Json<CreateUser>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("add_user", &headers);
    if state.users.iter().any(|(u, _)| u.email == req.email) {
        return (StatusCode::CONFLICT, "Email already exists").into_response();
    }
    let id = state.next_id();
    let user = User {
        id,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        permissions: req.permissions,
    };
    state.users.push((user.clone(), req.password));
    Json(user).into_response()
}

async fn update_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<User>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("update_user", &headers);
    match state.users.iter_mut().find(|(u, _)| u.id == id) {
        Some((user, _)) => {
            *user = User { id, ..req };
            Json(user.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_user(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("delete_user", &headers);
    state.users.retain(|(u, _)| u.id != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn available_dishes(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("dishes", &headers);
    let dishes: Vec<Dish> = state.dishes.iter().filter(|d| d.available).cloned().collect();
    Json(dishes).into_response()
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
    size: u32,
}

async fn error_page(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("error_page", &headers);
    if !state.paged_errors_supported {
        return StatusCode::NOT_FOUND.into_response();
    }
    let size = query.size.max(1) as usize;
    let total = state.errors.len();
    let content: Vec<ErrorMessage> = state
        .errors
        .iter()
        .skip(query.page as usize * size)
        .take(size)
        .cloned()
        .collect();
    Json(json!({
        "content": content,
        "totalPages": total.div_ceil(size),
        "totalElements": total,
        "number": query.page,
        "size": size,
    }))
    .into_response()
}

async fn all_errors(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.hit("all_errors", &headers);
    Json(state.errors.clone()).into_response()
}

pub fn error_message(id: i64, user: &User) -> ErrorMessage {
    ErrorMessage {
        id,
        order_id: None,
        operation: "PLACE_ORDER".to_string(),
        error_message: "Too many concurrent orders".to_string(),
        timestamp: timestamp(),
        user_id: Some(user.id),
        user_name: Some(user.full_name()),
    }
}
