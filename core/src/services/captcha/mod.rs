//! Image captcha issuance and verification
//!
//! Rendering is delegated to a `CaptchaDriver`; answers are kept in a
//! `CodeStore` namespaced for captchas.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::{CaptchaService, CAPTCHA_ID_LENGTH};
pub use traits::CaptchaDriver;
pub use types::{CaptchaIssued, Challenge};
