pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
