use food_client::{
    AppState,
    config::Config,
    router::{DEFAULT_ROUTE, RouteOutcome, Screen},
    session::CloseKind,
    views::OrderListView,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!("Using API at {}", config.api_base_url);

    let state = AppState::new(config.clone()).expect("Failed to build client");

    // 没有有效会话时用配置中的账号登录
    if !state.authority.is_authenticated() {
        let (Some(email), Some(password)) = (config.email.as_deref(), config.password.as_deref())
        else {
            tracing::error!("No session and FOOD_EMAIL / FOOD_PASSWORD not set");
            return;
        };
        if let Err(e) = state.authority.authenticate(email, password).await {
            tracing::error!("{}", e);
            return;
        }
    }

    match state.router.navigate(DEFAULT_ROUTE) {
        RouteOutcome::Mounted(route) if route.screen == Screen::OrderList => {}
        RouteOutcome::Redirected(nav) => {
            tracing::warn!(
                "Redirected to {}: {}",
                nav.path,
                nav.notice.as_deref().unwrap_or("sign in required")
            );
            return;
        }
        other => {
            tracing::error!("Unexpected navigation result: {:?}", other);
            return;
        }
    }

    let mut orders = OrderListView::mount(state.authority.clone(), &state.feed);
    if let Err(e) = orders.init().await {
        tracing::warn!("Initial order load failed: {}", e);
    }
    print_orders(&orders);

    loop {
        tokio::select! {
            updated = orders.next_update() => {
                if !updated {
                    break;
                }
                print_orders(&orders);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    orders.unmount();
    state.feed.shutdown();
    state.authority.close(CloseKind::Exit);
}

fn print_orders(view: &OrderListView) {
    tracing::info!("{} orders", view.orders.len());
    for order in &view.orders {
        let items = order
            .grouped_items()
            .iter()
            .map(|item| format!("{} x{}", item.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "#{} {} by {} [{}] {:.2} updated {}",
            order.id,
            order.status,
            order.created_by_name,
            items,
            order.total_price(),
            order.status_updated_at
        );
    }
}
