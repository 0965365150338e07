// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres, QueryBuilder};

use crate::{
    common::{
        db_utils::{OrderQuery, ORDER_COLUMNS},
        error::AppError,
    },
    models::{
        order::{Order, OrderChanges},
        reports::{CustomerRecentOrder, DailySummary, MonthlyProfit, MonthlyRevenue, TopCustomer},
    },
};

// Every interaction with the `orders` table.
#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    /// Fails with a database error when `customer_id` does not exist.
    pub async fn add<'e, E>(&self, executor: E, changes: &OrderChanges) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, total_amount, cost_amount, order_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, total_amount, cost_amount, order_date
            "#,
        )
        .bind(changes.customer_id)
        .bind(changes.total_amount)
        .bind(changes.cost_amount.unwrap_or(Decimal::ZERO))
        .bind(changes.order_date)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn get_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o WHERE o.id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn get_all<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.query(executor, &OrderQuery::all()).await
    }

    /// Filtered listing.
    pub async fn query<'e, E>(&self, executor: E, query: &OrderQuery) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {ORDER_COLUMNS} FROM orders o"));
        query.push_filters(&mut qb);

        let orders = qb.build_query_as::<Order>().fetch_all(executor).await?;

        Ok(orders)
    }

    /// Full replacement of the mutable fields. A `None` cost keeps the stored one.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        changes: &OrderChanges,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_id = $2,
                total_amount = $3,
                cost_amount = COALESCE($4, cost_amount),
                order_date = $5
            WHERE id = $1
            RETURNING id, customer_id, total_amount, cost_amount, order_date
            "#,
        )
        .bind(id)
        .bind(changes.customer_id)
        .bind(changes.total_amount)
        .bind(changes.cost_amount)
        .bind(changes.order_date)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  REPORTS
    // =========================================================================

    /// One row per month of `year` that has orders, ascending.
    pub async fn monthly_revenue<'e, E>(&self, executor: E, year: i32) -> Result<Vec<MonthlyRevenue>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT EXTRACT(MONTH FROM o.order_date)::int AS month, \
                    SUM(o.total_amount) AS total_revenue \
             FROM orders o",
        );
        OrderQuery::for_year(year).push_where(&mut qb);
        qb.push(" GROUP BY 1 ORDER BY 1");

        let rows = qb.build_query_as::<MonthlyRevenue>().fetch_all(executor).await?;

        Ok(rows)
    }

    pub async fn monthly_profit<'e, E>(&self, executor: E, year: i32) -> Result<Vec<MonthlyProfit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT EXTRACT(MONTH FROM o.order_date)::int AS month, \
                    SUM(o.total_amount) AS revenue, \
                    SUM(o.cost_amount) AS cost, \
                    SUM(o.total_amount) - SUM(o.cost_amount) AS profit \
             FROM orders o",
        );
        OrderQuery::for_year(year).push_where(&mut qb);
        qb.push(" GROUP BY 1 ORDER BY 1");

        let rows = qb.build_query_as::<MonthlyProfit>().fetch_all(executor).await?;

        Ok(rows)
    }

    /// Customers ranked by total spent. Equal totals keep the customer whose
    /// first order came earlier in front.
    pub async fn top_customers<'e, E>(&self, executor: E, top: i64) -> Result<Vec<TopCustomer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, TopCustomer>(
            r#"
            SELECT c.id AS customer_id,
                   c.full_name,
                   SUM(o.total_amount) AS total_spent
            FROM orders o
            INNER JOIN customers c ON c.id = o.customer_id
            GROUP BY c.id, c.full_name
            ORDER BY total_spent DESC, MIN(o.id)
            LIMIT $1
            "#,
        )
        .bind(top)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Orders strictly above the mean amount of their own customer, by id.
    pub async fn above_customer_average<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM (
                SELECT orders.*,
                       AVG(total_amount) OVER (PARTITION BY customer_id) AS customer_average
                FROM orders
            ) o
            WHERE o.total_amount > o.customer_average
            ORDER BY o.id
            "#
        ))
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Latest order of every customer; on equal dates the lower order id wins.
    /// Customers come in the order of their first order.
    pub async fn most_recent_per_customer<'e, E>(&self, executor: E) -> Result<Vec<CustomerRecentOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CustomerRecentOrder>(
            r#"
            SELECT r.customer_id, r.customer_name, r.order_id, r.order_date, r.total_amount
            FROM (
                SELECT o.customer_id,
                       c.full_name AS customer_name,
                       o.id AS order_id,
                       o.order_date,
                       o.total_amount,
                       ROW_NUMBER() OVER (PARTITION BY o.customer_id ORDER BY o.order_date DESC, o.id) AS latest_rank,
                       MIN(o.id) OVER (PARTITION BY o.customer_id) AS first_order_id
                FROM orders o
                INNER JOIN customers c ON c.id = o.customer_id
            ) r
            WHERE r.latest_rank = 1
            ORDER BY r.first_order_id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Calendar days with at least `min_orders` orders, ascending.
    pub async fn daily_summary<'e, E>(&self, executor: E, min_orders: i64) -> Result<Vec<DailySummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT o.order_date::date AS order_date,
                   COUNT(*) AS order_count,
                   SUM(o.total_amount) AS daily_revenue
            FROM orders o
            GROUP BY 1
            HAVING COUNT(*) >= $1
            ORDER BY 1
            "#,
        )
        .bind(min_orders)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}
