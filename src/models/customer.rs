// src/models/customer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Masa")]
    pub full_name: String,
}
