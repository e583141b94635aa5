//! Auth domain - passwordless login via emailed one-time codes
//!
//! Flow:
//!   requestOtp → issue code → store → email
//!   verifyOtp  → latest code for email → single-use/expiry checks → JWT
//!   googleLogin → verified Google email → JWT
//!
//! Responsibilities:
//! - OTP generation, persistence and single-use consumption
//! - Session/JWT token management
//! - Google ID token bridge

pub mod actions;
pub mod data;
pub mod edges;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod otp;

pub use data::AuthPayload;
pub use errors::LoginError;
pub use jwt::{Claims, JwtService};
