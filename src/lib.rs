/*
 * Responsibility
 * - crate root: module tree for the binary and for integration tests
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
