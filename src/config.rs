// src/config.rs

use crate::{
    db::{CustomerRepository, OrderRepository},
    services::{CustomerService, OrderService},
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, net::SocketAddr, str::FromStr, time::Duration};

// Settings read from the environment (optionally through a .env file).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            server_addr: parse_var("SERVER_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", 3)?),
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub customer_service: CustomerService,
    pub order_service: OrderService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        Ok(Self::with_pool(db_pool))
    }

    // Wires the dependency graph on top of an existing pool.
    pub fn with_pool(db_pool: PgPool) -> Self {
        let customer_repo = CustomerRepository::new();
        let order_repo = OrderRepository::new();

        Self {
            db_pool,
            customer_service: CustomerService::new(customer_repo, order_repo.clone()),
            order_service: OrderService::new(order_repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let value: u32 = parse_var("ORDERS_API_TEST_SURELY_UNSET_VAR", 7).expect("default");
        assert_eq!(value, 7);
    }
}
