// src/models/order.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Read shape of an order. There is no customer navigation here; reports that
// need the customer join it in SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = 1)]
    pub customer_id: i32,

    #[schema(example = 99.10)]
    pub total_amount: Decimal,

    #[schema(example = 60.00)]
    pub cost_amount: Decimal,

    #[schema(example = "2025-01-01T00:00:00")]
    pub order_date: NaiveDateTime,
}

// Mutable fields of an order, as accepted on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderChanges {
    pub customer_id: i32,
    pub total_amount: Decimal,
    // None: 0 on insert, untouched on update.
    pub cost_amount: Option<Decimal>,
    pub order_date: NaiveDateTime,
}
