//! Common utility functions

pub mod subject;

pub use subject::{classify, is_valid_email, mask_subject, SubjectKind};
