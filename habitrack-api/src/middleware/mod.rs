/// Middleware modules for the API server
///
/// Session authentication is applied per route group in [`crate::app`].
///
/// - `security`: security response headers

pub mod security;
