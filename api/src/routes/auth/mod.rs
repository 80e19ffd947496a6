//! Authentication route handlers
//!
//! - Signup existence checks for phone numbers and emails
//! - Image captcha issuance
//! - SMS verification codes (send and check)

pub mod signup;
pub mod verify_code;

pub use signup::{is_email_exist, is_phone_exist};
pub use verify_code::{check_code, send_using_phone, show_captcha};
