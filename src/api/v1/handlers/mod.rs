pub mod api_docs;
pub mod fallback;
pub mod health;
pub mod me;
