//! PostgreSQL connectivity for the users service.
//!
//! - [`postgres`]: pool configuration, connect (with retry), migrations, health checks
//! - [`common`]: shared error type and the backoff helper used while connecting
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use core_config::FromEnv;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "users_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
