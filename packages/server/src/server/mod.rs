// HTTP server setup (Axum + GraphQL)
pub mod app;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use error::ApiError;
pub use graphql::*;
