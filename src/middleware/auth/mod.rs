pub mod access;
pub mod public_routes;
