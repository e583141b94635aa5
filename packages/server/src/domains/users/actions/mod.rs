//! User domain actions - record management shared by REST and GraphQL

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
