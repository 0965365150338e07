// src/models/reports.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// =========================================================================
//  ORDER REPORTS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    #[schema(example = 1)]
    pub month: i32,
    #[schema(example = 446.48)]
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    #[schema(example = 4)]
    pub customer_id: i32,
    #[schema(example = "Nidal")]
    pub full_name: String,
    #[schema(example = 200.20)]
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProfit {
    #[schema(example = 1)]
    pub month: i32,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecentOrder {
    #[schema(example = 1)]
    pub customer_id: i32,
    #[schema(example = "Masa")]
    pub customer_name: String,
    #[schema(example = 1)]
    pub order_id: i32,
    #[schema(example = "2025-01-01T00:00:00")]
    pub order_date: NaiveDateTime,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[schema(example = "2025-01-01")]
    pub order_date: NaiveDate,
    #[schema(example = 2)]
    pub order_count: i64,
    pub daily_revenue: Decimal,
}

// =========================================================================
//  CUSTOMER REPORTS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAverage {
    #[schema(example = 1)]
    pub customer_id: i32,
    #[schema(example = "Masa")]
    pub full_name: String,
    #[schema(example = 3)]
    pub order_count: i64,
    pub average_order_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLifetimeStats {
    pub customer_id: i32,
    pub full_name: String,
    pub total_orders: i64,
    pub total_spent: Decimal,
    // null when the customer never ordered
    pub last_order_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderAggregate {
    pub customer_id: i32,
    pub full_name: String,
    pub total_orders: i64,
    pub total_spent: Decimal,
}
