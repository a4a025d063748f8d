pub mod catalog;
pub mod catalog_city;
pub mod catalog_client;
pub mod error;
pub mod schema;
