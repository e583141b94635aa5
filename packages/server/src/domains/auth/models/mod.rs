pub mod otp;

pub use otp::{Otp, OTP_TTL_MINUTES};
