/*
 * Responsibility
 * - Public entry points of the middleware stack (each module exposes `apply`)
 */
pub mod auth;
pub mod cors;
pub mod errors;
pub mod http;
