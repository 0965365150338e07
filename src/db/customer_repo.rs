// src/db/customer_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::{
        customer::Customer,
        reports::{CustomerAverage, CustomerLifetimeStats, CustomerOrderAggregate},
    },
};

// Every interaction with the `customers` table.
#[derive(Clone, Default)]
pub struct CustomerRepository;

impl CustomerRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn add<'e, E>(&self, executor: E, full_name: &str) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (full_name) VALUES ($1) RETURNING id, full_name",
        )
        .bind(full_name)
        .fetch_one(executor)
        .await?;

        Ok(customer)
    }

    pub async fn get_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT id, full_name FROM customers WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(customer)
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT id, full_name FROM customers ORDER BY id")
                .fetch_all(executor)
                .await?;

        Ok(customers)
    }

    /// Returns `None` when no customer has this id.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        full_name: &str,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET full_name = $2 WHERE id = $1 RETURNING id, full_name",
        )
        .bind(id)
        .bind(full_name)
        .fetch_optional(executor)
        .await?;

        Ok(customer)
    }

    /// Orders go with the customer (ON DELETE CASCADE).
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  REPORTS
    // =========================================================================

    pub async fn without_orders<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT c.id, c.full_name
            FROM customers c
            WHERE NOT EXISTS (SELECT 1 FROM orders o WHERE o.customer_id = c.id)
            ORDER BY c.id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(customers)
    }

    /// Customers with at least `min_orders` orders (never fewer than one).
    pub async fn average_order_values<'e, E>(
        &self,
        executor: E,
        min_orders: i64,
    ) -> Result<Vec<CustomerAverage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CustomerAverage>(
            r#"
            SELECT c.id AS customer_id,
                   c.full_name,
                   COUNT(o.id) AS order_count,
                   AVG(o.total_amount) AS average_order_value
            FROM customers c
            INNER JOIN orders o ON o.customer_id = c.id
            GROUP BY c.id, c.full_name
            HAVING COUNT(o.id) >= $1
            ORDER BY c.id
            "#,
        )
        .bind(min_orders)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn lifetime_stats<'e, E>(&self, executor: E) -> Result<Vec<CustomerLifetimeStats>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CustomerLifetimeStats>(
            r#"
            SELECT c.id AS customer_id,
                   c.full_name,
                   COUNT(o.id) AS total_orders,
                   COALESCE(SUM(o.total_amount), 0) AS total_spent,
                   MAX(o.order_date) AS last_order_date
            FROM customers c
            LEFT JOIN orders o ON o.customer_id = c.id
            GROUP BY c.id, c.full_name
            ORDER BY c.id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn order_aggregates<'e, E>(&self, executor: E) -> Result<Vec<CustomerOrderAggregate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CustomerOrderAggregate>(
            r#"
            SELECT c.id AS customer_id,
                   c.full_name,
                   COUNT(o.id) AS total_orders,
                   COALESCE(SUM(o.total_amount), 0) AS total_spent
            FROM customers c
            LEFT JOIN orders o ON o.customer_id = c.id
            GROUP BY c.id, c.full_name
            ORDER BY c.id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}
