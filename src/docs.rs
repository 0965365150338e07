// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,
        handlers::health::readiness,

        // --- Customers ---
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::list_customer_orders,

        // --- Customer reports ---
        handlers::customers::customers_with_no_orders,
        handlers::customers::average_order_values,
        handlers::customers::lifetime_stats,
        handlers::customers::order_aggregates,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,

        // --- Order reports ---
        handlers::orders::monthly_revenue,
        handlers::orders::top_customers,
        handlers::orders::monthly_profit,
        handlers::orders::orders_above_customer_average,
        handlers::orders::most_recent_order_per_customer,
        handlers::orders::daily_summary,
    ),
    components(
        schemas(
            models::customer::Customer,
            models::order::Order,

            models::reports::MonthlyRevenue,
            models::reports::TopCustomer,
            models::reports::MonthlyProfit,
            models::reports::CustomerRecentOrder,
            models::reports::DailySummary,
            models::reports::CustomerAverage,
            models::reports::CustomerLifetimeStats,
            models::reports::CustomerOrderAggregate,

            // --- Payloads ---
            handlers::customers::CustomerPayload,
            handlers::orders::OrderPayload,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Customers", description = "Customer management"),
        (name = "Customer Reports", description = "Aggregations over customers and their orders"),
        (name = "Orders", description = "Order management"),
        (name = "Order Reports", description = "Revenue, profit and ranking reports")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/customers",
            "/api/customers/{id}",
            "/api/customers/no-orders",
            "/api/customers/lifetime-stats",
            "/api/orders/{id}",
            "/api/orders/top-customers",
            "/api/orders/daily-summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
