//! Users domain - user records and the role each one grants at login

pub mod actions;
pub mod data;
pub mod edges;
pub mod errors;
pub mod models;

pub use data::UserData;
pub use errors::UserError;
pub use models::{NewUser, Role, UpdateUser, User};
