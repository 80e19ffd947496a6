//! Captcha rendering

pub mod digit_driver;

pub use digit_driver::DigitCaptchaDriver;
