pub mod models;
pub mod schema;
pub mod repository;
pub mod connection;

pub use connection::*;
