/// Database layer
///
/// - `pool`: Postgres connection pool with a startup health check
/// - `migrations`: embedded schema migrations
///
/// Queries live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
