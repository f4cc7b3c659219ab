//! Data access for the scrum tool: a pooled PostgreSQL connection provider
//! plus the project, user and sign-in queries the web layer calls.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod password;

pub use db::{ConnectionSettings, Database, Driver, PoolSettings};
pub use error::{DataError, Result};
