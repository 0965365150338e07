pub mod customer_service;
pub use customer_service::CustomerService;
pub mod order_service;
pub use order_service::OrderService;
pub mod reports;
