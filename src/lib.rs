//! Catalog and shopping-cart backend: categories, brands, products and their
//! photos, plus orders, line items, customers and shipping addresses, stored
//! in PostgreSQL through Diesel and exposed over actix-web.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod slug;

pub use error::AppError;
