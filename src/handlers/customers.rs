// src/handlers/customers.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        customer::Customer,
        order::Order,
        reports::{CustomerAverage, CustomerLifetimeStats, CustomerOrderAggregate},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(
        length(min = 1, max = 200, message = "fullName must have between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Masa")]
    pub full_name: String,
}

fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("fullName cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

// =============================================================================
//  CRUD
// =============================================================================

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "All customers", body = Vec<Customer>)
    )
)]
pub async fn list_customers(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service
        .list_customers(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = Customer),
        (status = 404, description = "No customer with this id")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service
        .get_customer(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state.customer_service
        .create_customer(&app_state.db_pool, &payload.full_name)
        .await?;

    let location = format!("/api/customers/{}", customer.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 204, description = "Customer updated"),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "No customer with this id")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state.customer_service
        .update_customer(&app_state.db_pool, id, &payload.full_name)
        .await?;

    if !updated {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer and its orders deleted"),
        (status = 404, description = "No customer with this id")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state.customer_service
        .delete_customer(&app_state.db_pool, id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/customers/{id}/orders
#[utoipa::path(
    get,
    path = "/api/customers/{id}/orders",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders of the customer", body = Vec<Order>),
        (status = 404, description = "No customer with this id")
    )
)]
pub async fn list_customer_orders(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.customer_service
        .list_customer_orders(&app_state.db_pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((StatusCode::OK, Json(orders)))
}

// =============================================================================
//  REPORTS
// =============================================================================

// GET /api/customers/no-orders
#[utoipa::path(
    get,
    path = "/api/customers/no-orders",
    tag = "Customer Reports",
    responses(
        (status = 200, description = "Customers that never ordered", body = Vec<Customer>)
    )
)]
pub async fn customers_with_no_orders(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service
        .customers_with_no_orders(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/average-orders
#[utoipa::path(
    get,
    path = "/api/customers/average-orders",
    tag = "Customer Reports",
    responses(
        (status = 200, description = "Average order value of customers with at least 3 orders", body = Vec<CustomerAverage>)
    )
)]
pub async fn average_order_values(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let averages = app_state.customer_service
        .average_order_values(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(averages)))
}

// GET /api/customers/lifetime-stats
#[utoipa::path(
    get,
    path = "/api/customers/lifetime-stats",
    tag = "Customer Reports",
    responses(
        (status = 200, description = "Order count, total spent and last order date per customer", body = Vec<CustomerLifetimeStats>)
    )
)]
pub async fn lifetime_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.customer_service
        .lifetime_stats(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/customers/order-aggregates
#[utoipa::path(
    get,
    path = "/api/customers/order-aggregates",
    tag = "Customer Reports",
    responses(
        (status = 200, description = "Order count and total spent per customer", body = Vec<CustomerOrderAggregate>)
    )
)]
pub async fn order_aggregates(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let aggregates = app_state.customer_service
        .order_aggregates(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(aggregates)))
}
