// src/services/order_service.rs

use chrono::Local;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::{
        order::{Order, OrderChanges},
        reports::{CustomerRecentOrder, DailySummary, MonthlyProfit, MonthlyRevenue, TopCustomer},
    },
    services::reports,
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    pub async fn list_orders<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_all(executor).await
    }

    pub async fn get_order<'e, E>(&self, executor: E, id: i32) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_by_id(executor, id).await
    }

    pub async fn create_order<'e, E>(&self, executor: E, changes: &OrderChanges) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let order = self.repo.add(&mut *tx, changes).await?;
        tx.commit().await?;

        tracing::info!(order_id = order.id, customer_id = order.customer_id, "order created");
        Ok(order)
    }

    /// `false` when the order does not exist.
    pub async fn update_order<'e, E>(&self, executor: E, id: i32, changes: &OrderChanges) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let updated = self.repo.update(&mut *tx, id, changes).await?;
        tx.commit().await?;

        Ok(updated.is_some())
    }

    /// `false` when the order does not exist.
    pub async fn delete_order<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let deleted = self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(deleted)
    }

    // =========================================================================
    //  REPORTS
    // =========================================================================

    /// Defaults to the current calendar year (local time) when `year` is `None`.
    pub async fn monthly_revenue<'e, E>(&self, executor: E, year: Option<i32>) -> Result<Vec<MonthlyRevenue>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let year = reports::report_year(year, Local::now().date_naive());
        self.repo.monthly_revenue(executor, year).await
    }

    pub async fn top_customers<'e, E>(&self, executor: E, top: usize) -> Result<Vec<TopCustomer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let limit = i64::try_from(top).unwrap_or(i64::MAX);
        self.repo.top_customers(executor, limit).await
    }

    pub async fn monthly_profit<'e, E>(&self, executor: E, year: i32) -> Result<Vec<MonthlyProfit>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.monthly_profit(executor, year).await
    }

    pub async fn orders_above_customer_average<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.above_customer_average(executor).await
    }

    pub async fn most_recent_order_per_customer<'e, E>(&self, executor: E) -> Result<Vec<CustomerRecentOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.most_recent_per_customer(executor).await
    }

    pub async fn daily_summary<'e, E>(&self, executor: E) -> Result<Vec<DailySummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.daily_summary(executor, reports::MIN_ORDERS_PER_DAY).await
    }
}
