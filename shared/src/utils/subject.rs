//! Helpers for verification subjects (phone numbers and email addresses)

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// What a subject string looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Phone,
    Email,
}

/// Classify a subject; anything containing `@` is treated as an email
pub fn classify(subject: &str) -> SubjectKind {
    if subject.contains('@') {
        SubjectKind::Email
    } else {
        SubjectKind::Phone
    }
}

/// Check if an email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask a subject for logs, e.g. `138****5678` or `j***@example.com`
pub fn mask_subject(subject: &str) -> String {
    match classify(subject) {
        SubjectKind::Email => mask_email(subject),
        SubjectKind::Phone => mask_phone(subject),
    }
}

fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}
