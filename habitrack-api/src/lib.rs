//! # Habitrack API Server Library
//!
//! REST backend for the Habitrack productivity app: habits, todos and
//! Pomodoro timer settings, each scoped to the signed-in user.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors mapped onto the error type
//! - `middleware`: Response middleware
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
