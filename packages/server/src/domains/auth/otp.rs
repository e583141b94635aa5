//! One-time code generation.

use rand::rngs::OsRng;
use rand::Rng;

/// Number of digits in an issued code
pub const OTP_LENGTH: usize = 6;

/// Generate a numeric code from the operating system CSPRNG.
///
/// Each digit is drawn independently from 0-9, so leading zeros are kept.
pub fn generate_otp_code() -> String {
    let mut rng = OsRng;
    (0..OTP_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
