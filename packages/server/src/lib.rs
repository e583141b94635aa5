// User Management Service - API Core
//
// REST and GraphQL surfaces for user records plus passwordless email OTP login.
// Architecture follows the domain layout: domains/* hold models, actions and
// GraphQL edges; kernel/* holds infrastructure traits and their implementations.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
