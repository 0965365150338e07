// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        order::{Order, OrderChanges},
        reports::{CustomerRecentOrder, DailySummary, MonthlyProfit, MonthlyRevenue, TopCustomer},
    },
    services::reports::DEFAULT_TOP_CUSTOMERS,
};

// =============================================================================
//  PAYLOADS
// =============================================================================

// Create/update shape: no id, cost is optional.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[schema(example = 1)]
    pub customer_id: i32,

    #[schema(example = 99.10)]
    pub total_amount: Decimal,

    // 0 when creating; kept as stored when updating.
    #[schema(example = 60.00)]
    pub cost_amount: Option<Decimal>,

    #[schema(example = "2025-01-01T00:00:00")]
    pub order_date: NaiveDateTime,
}

impl Validate for OrderPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.customer_id < 1 {
            let mut err = ValidationError::new("range");
            err.message = Some("customerId must reference an existing customer".into());
            errors.add("customer_id", err);
        }
        if let Err(err) = validate_amount(&self.total_amount) {
            errors.add("total_amount", err);
        }
        if let Some(Err(err)) = self.cost_amount.as_ref().map(validate_amount) {
            errors.add("cost_amount", err);
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<OrderPayload> for OrderChanges {
    fn from(payload: OrderPayload) -> Self {
        Self {
            customer_id: payload.customer_id,
            total_amount: payload.total_amount,
            cost_amount: payload.cost_amount,
            order_date: payload.order_date,
        }
    }
}

// Amounts are stored as NUMERIC(18, 2).
const MAX_AMOUNT_SCALE: u32 = 2;
const AMOUNT_LIMIT: i64 = 10_000_000_000_000_000; // 10^16

fn validate_amount(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("amounts cannot be negative".into());
        return Err(err);
    }
    if val.normalize().scale() > MAX_AMOUNT_SCALE {
        let mut err = ValidationError::new("scale");
        err.add_param("max_scale".into(), &MAX_AMOUNT_SCALE);
        err.message = Some("amounts cannot have more than 2 decimal places".into());
        return Err(err);
    }
    if *val >= Decimal::from(AMOUNT_LIMIT) {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &AMOUNT_LIMIT);
        err.message = Some("amounts must be below 10^16".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyRevenueQuery {
    /// Defaults to the current year.
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthlyProfitQuery {
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: i32,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopCustomersQuery {
    /// How many customers to return (default 5).
    #[validate(range(min = 1, max = 100, message = "top must be between 1 and 100"))]
    pub top: Option<usize>,
}

// =============================================================================
//  CRUD
// =============================================================================

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders", body = Vec<Order>)
    )
)]
pub async fn list_orders(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service
        .list_orders(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "No order with this id")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service
        .get_order(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(order)))
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Invalid data"),
        (status = 500, description = "Unknown customer (foreign key violation)")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service
        .create_order(&app_state.db_pool, &payload.into())
        .await?;

    let location = format!("/api/orders/{}", order.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)))
}

// PUT /api/orders/{id}
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderPayload,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "No order with this id")
    )
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state.order_service
        .update_order(&app_state.db_pool, id, &payload.into())
        .await?;

    if !updated {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "No order with this id")
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state.order_service
        .delete_order(&app_state.db_pool, id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  REPORTS
// =============================================================================

// GET /api/orders/monthly-revenue
#[utoipa::path(
    get,
    path = "/api/orders/monthly-revenue",
    tag = "Order Reports",
    params(MonthlyRevenueQuery),
    responses(
        (status = 200, description = "Revenue per month with orders", body = Vec<MonthlyRevenue>)
    )
)]
pub async fn monthly_revenue(
    State(app_state): State<AppState>,
    Query(query): Query<MonthlyRevenueQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let report = app_state.order_service
        .monthly_revenue(&app_state.db_pool, query.year)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/orders/top-customers?top=N
#[utoipa::path(
    get,
    path = "/api/orders/top-customers",
    tag = "Order Reports",
    params(TopCustomersQuery),
    responses(
        (status = 200, description = "Customers ranked by total spent", body = Vec<TopCustomer>),
        (status = 400, description = "Invalid top")
    )
)]
pub async fn top_customers(
    State(app_state): State<AppState>,
    Query(query): Query<TopCustomersQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let top = app_state.order_service
        .top_customers(&app_state.db_pool, query.top.unwrap_or(DEFAULT_TOP_CUSTOMERS))
        .await?;

    Ok((StatusCode::OK, Json(top)))
}

// GET /api/orders/monthly-profit?year=Y
#[utoipa::path(
    get,
    path = "/api/orders/monthly-profit",
    tag = "Order Reports",
    params(MonthlyProfitQuery),
    responses(
        (status = 200, description = "Revenue, cost and profit per month", body = Vec<MonthlyProfit>),
        (status = 400, description = "Missing or invalid year")
    )
)]
pub async fn monthly_profit(
    State(app_state): State<AppState>,
    Query(query): Query<MonthlyProfitQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let report = app_state.order_service
        .monthly_profit(&app_state.db_pool, query.year)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/orders/above-average
#[utoipa::path(
    get,
    path = "/api/orders/above-average",
    tag = "Order Reports",
    responses(
        (status = 200, description = "Orders above their customer's average amount", body = Vec<Order>)
    )
)]
pub async fn orders_above_customer_average(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service
        .orders_above_customer_average(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/most-recent-per-customer
#[utoipa::path(
    get,
    path = "/api/orders/most-recent-per-customer",
    tag = "Order Reports",
    responses(
        (status = 200, description = "Latest order of every customer", body = Vec<CustomerRecentOrder>)
    )
)]
pub async fn most_recent_order_per_customer(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service
        .most_recent_order_per_customer(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/daily-summary
#[utoipa::path(
    get,
    path = "/api/orders/daily-summary",
    tag = "Order Reports",
    responses(
        (status = 200, description = "Days with at least two orders", body = Vec<DailySummary>)
    )
)]
pub async fn daily_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.order_service
        .daily_summary(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> OrderPayload {
        serde_json::from_str(json).expect("valid json")
    }

    fn jan_first() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn payload_without_cost_is_valid() {
        let p = payload(r#"{"customerId":1,"totalAmount":99.10,"orderDate":"2025-01-01T00:00:00"}"#);

        assert!(p.validate().is_ok());
        assert_eq!(p.total_amount, Decimal::new(9910, 2));
        assert_eq!(p.cost_amount, None);
    }

    #[test]
    fn payload_rejects_negative_amounts() {
        let p = payload(
            r#"{"customerId":1,"totalAmount":-1,"costAmount":-2,"orderDate":"2025-01-01T00:00:00"}"#,
        );

        let errors = p.validate().expect_err("negative amounts must fail");
        let fields = errors.field_errors();
        assert!(fields.contains_key("total_amount"));
        assert!(fields.contains_key("cost_amount"));
    }

    #[test]
    fn payload_rejects_more_than_two_decimal_places() {
        let p = payload(r#"{"customerId":1,"totalAmount":10.005,"orderDate":"2025-01-01T00:00:00"}"#);

        let errors = p.validate().expect_err("three decimals must fail");
        assert!(errors.field_errors().contains_key("total_amount"));
    }

    #[test]
    fn trailing_zeros_do_not_count_as_decimal_places() {
        let p = OrderPayload {
            customer_id: 1,
            total_amount: Decimal::new(10500, 3),
            cost_amount: Some(Decimal::new(1_000, 3)),
            order_date: jan_first(),
        };

        assert!(p.validate().is_ok());
    }

    #[test]
    fn payload_rejects_amounts_beyond_the_column_precision() {
        let p = payload(
            r#"{"customerId":1,"totalAmount":1,"costAmount":1e17,"orderDate":"2025-01-01T00:00:00"}"#,
        );

        let errors = p.validate().expect_err("overflowing cost must fail");
        assert!(errors.field_errors().contains_key("cost_amount"));

        let largest = OrderPayload {
            customer_id: 1,
            total_amount: Decimal::new(999_999_999_999_999_999, 2),
            cost_amount: None,
            order_date: jan_first(),
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn payload_rejects_non_positive_customer_id() {
        let p = payload(r#"{"customerId":0,"totalAmount":1,"orderDate":"2025-01-01T00:00:00"}"#);

        assert!(p.validate().is_err());
    }

    #[test]
    fn top_is_bounded() {
        assert!(TopCustomersQuery { top: Some(0) }.validate().is_err());
        assert!(TopCustomersQuery { top: Some(101) }.validate().is_err());
        assert!(TopCustomersQuery { top: Some(2) }.validate().is_ok());
        assert!(TopCustomersQuery { top: None }.validate().is_ok());
    }

    #[test]
    fn payload_converts_into_order_changes() {
        let changes: OrderChanges = payload(
            r#"{"customerId":3,"totalAmount":10,"costAmount":4,"orderDate":"2025-02-03T10:30:00"}"#,
        )
        .into();

        assert_eq!(changes.customer_id, 3);
        assert_eq!(changes.cost_amount, Some(Decimal::from(4)));
        assert_eq!(changes.order_date.to_string(), "2025-02-03 10:30:00");
    }
}
