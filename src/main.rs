//src/main.rs

use axum::{
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "orders_api=info,tower_http=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    if config.run_migrations {
        sqlx::migrate!().run(&app_state.db_pool).await?;
        tracing::info!("✅ Database migrations applied");
    }

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.server_addr).await?;
    tracing::info!("🚀 Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_router(app_state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/"
               ,get(handlers::customers::list_customers)
               .post(handlers::customers::create_customer)
        )
        .route("/{id}"
               ,get(handlers::customers::get_customer)
               .put(handlers::customers::update_customer)
               .delete(handlers::customers::delete_customer)
        )
        .route("/{id}/orders", get(handlers::customers::list_customer_orders))
        // Reports
        .route("/no-orders", get(handlers::customers::customers_with_no_orders))
        .route("/average-orders", get(handlers::customers::average_order_values))
        .route("/lifetime-stats", get(handlers::customers::lifetime_stats))
        .route("/order-aggregates", get(handlers::customers::order_aggregates));

    let order_routes = Router::new()
        .route("/"
               ,get(handlers::orders::list_orders)
               .post(handlers::orders::create_order)
        )
        .route("/{id}"
               ,get(handlers::orders::get_order)
               .put(handlers::orders::update_order)
               .delete(handlers::orders::delete_order)
        )
        // Reports
        .route("/monthly-revenue", get(handlers::orders::monthly_revenue))
        .route("/top-customers", get(handlers::orders::top_customers))
        .route("/monthly-profit", get(handlers::orders::monthly_profit))
        .route("/above-average", get(handlers::orders::orders_above_customer_average))
        .route("/most-recent-per-customer", get(handlers::orders::most_recent_order_per_customer))
        .route("/daily-summary", get(handlers::orders::daily_summary));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/health/ready", get(handlers::health::readiness))
        .nest("/api/customers", customer_routes)
        .nest("/api/orders", order_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
