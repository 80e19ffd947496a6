//! Types exchanged with stores and delivery channels

use std::collections::BTreeMap;

/// Result of comparing a submitted answer with the stored code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The answer equals the stored code
    Matched,
    /// A code is stored but the answer differs
    Mismatch,
    /// Nothing stored under the key, never issued or already expired
    Missing,
}

impl CheckOutcome {
    /// Collapse to the boolean verify contract
    pub fn is_match(&self) -> bool {
        matches!(self, CheckOutcome::Matched)
    }
}

/// Templated message handed to a delivery channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Provider template identifier
    pub template: String,
    /// Template variables
    pub data: BTreeMap<String, String>,
}

impl SmsMessage {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            data: BTreeMap::new(),
        }
    }

    /// Add a template variable
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
