//! Verification code workflow for phone and email subjects
//!
//! This module provides:
//! - Numeric code generation with a fixed-code override for local runs
//! - The `CodeStore` seam over the cache holding issued codes
//! - The `DeliveryChannel` seam over SMS providers
//! - An injected `EnvironmentPolicy` deciding every debug bypass
//! - `VerifyCodeService` orchestrating send and check

mod config;
mod generator;
mod policy;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::VerificationServiceConfig;
pub use generator::CodeGenerator;
pub use policy::{DebugPolicy, EnvironmentPolicy};
pub use service::VerifyCodeService;
pub use traits::{CodeStore, DeliveryChannel};
pub use types::{CheckOutcome, SmsMessage};
