// HTTP server setup (Axum + platform interactions)
pub mod app;
pub mod interactions;
pub mod middleware;
pub mod routes;

pub use app::*;
