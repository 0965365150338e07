// src/services/customer_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::{db_utils::OrderQuery, error::AppError},
    db::{CustomerRepository, OrderRepository},
    models::{
        customer::Customer,
        order::Order,
        reports::{CustomerAverage, CustomerLifetimeStats, CustomerOrderAggregate},
    },
    services::reports,
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    order_repo: OrderRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, order_repo: OrderRepository) -> Self {
        Self { repo, order_repo }
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_all(executor).await
    }

    pub async fn get_customer<'e, E>(&self, executor: E, id: i32) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_by_id(executor, id).await
    }

    pub async fn create_customer<'e, E>(&self, executor: E, full_name: &str) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let customer = self.repo.add(&mut *tx, full_name).await?;
        tx.commit().await?;

        tracing::info!(customer_id = customer.id, "customer created");
        Ok(customer)
    }

    /// `false` when the customer does not exist.
    pub async fn update_customer<'e, E>(&self, executor: E, id: i32, full_name: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let updated = self.repo.update(&mut *tx, id, full_name).await?;
        tx.commit().await?;

        Ok(updated.is_some())
    }

    /// `false` when the customer does not exist. Its orders are removed too.
    pub async fn delete_customer<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        let deleted = self.repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        if deleted {
            tracing::info!(customer_id = id, "customer deleted");
        }
        Ok(deleted)
    }

    /// `None` when the customer does not exist; an existing customer without
    /// orders yields an empty list.
    pub async fn list_customer_orders<'e, E>(&self, executor: E, id: i32) -> Result<Option<Vec<Order>>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if self.repo.get_by_id(&mut *tx, id).await?.is_none() {
            return Ok(None);
        }
        let orders = self.order_repo.query(&mut *tx, &OrderQuery::all().customer(id)).await?;

        tx.commit().await?;
        Ok(Some(orders))
    }

    // =========================================================================
    //  REPORTS
    // =========================================================================

    pub async fn customers_with_no_orders<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.without_orders(executor).await
    }

    pub async fn average_order_values<'e, E>(&self, executor: E) -> Result<Vec<CustomerAverage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.average_order_values(executor, reports::MIN_ORDERS_FOR_AVERAGE).await
    }

    pub async fn lifetime_stats<'e, E>(&self, executor: E) -> Result<Vec<CustomerLifetimeStats>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.lifetime_stats(executor).await
    }

    pub async fn order_aggregates<'e, E>(&self, executor: E) -> Result<Vec<CustomerOrderAggregate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.order_aggregates(executor).await
    }
}
