//! Unit tests for the debug environment policy

use hub_shared::config::{CaptchaConfig, CheckBypassGate, Environment, VerifyCodeConfig};

use crate::services::verification::{DebugPolicy, EnvironmentPolicy};

fn policy(env: Environment, configure: impl FnOnce(&mut VerifyCodeConfig)) -> DebugPolicy {
    let mut verify_code = VerifyCodeConfig::default();
    configure(&mut verify_code);
    DebugPolicy::new(env, &verify_code, &CaptchaConfig::default())
}

#[test]
fn test_fixed_code_only_in_local() {
    assert_eq!(
        policy(Environment::Local, |_| {}).fixed_code(),
        Some("123456".to_string())
    );
    assert_eq!(policy(Environment::Testing, |_| {}).fixed_code(), None);
    assert_eq!(policy(Environment::Production, |_| {}).fixed_code(), None);
    assert_eq!(
        policy(Environment::Local, |c| c.debug_code.clear()).fixed_code(),
        None
    );
}

#[test]
fn test_skip_delivery_outside_production() {
    let local = policy(Environment::Testing, |c| c.debug_phone_prefix = "test".to_string());
    assert!(local.skip_delivery("test0001234"));
    assert!(!local.skip_delivery("13812345678"));

    let prod = policy(Environment::Production, |c| c.debug_phone_prefix = "test".to_string());
    assert!(!prod.skip_delivery("test0001234"));
}

#[test]
fn test_empty_prefix_never_matches() {
    let local = policy(Environment::Local, |c| c.debug_phone_prefix.clear());
    assert!(!local.skip_delivery("13812345678"));
    assert!(!local.skip_delivery(""));
}

#[test]
fn test_bypass_check_follows_gate() {
    let non_prod = policy(Environment::Local, |c| c.debug_phone_suffix = "9999".to_string());
    assert!(non_prod.bypass_check("13800009999"));
    assert!(non_prod.bypass_check("someone@testing.com"));
    assert!(!non_prod.bypass_check("13812345678"));

    let prod_default = policy(Environment::Production, |_| {});
    assert!(!prod_default.bypass_check("someone@testing.com"));

    let legacy = policy(Environment::Production, |c| {
        c.check_bypass = CheckBypassGate::Production;
    });
    assert!(legacy.bypass_check("someone@testing.com"));

    let legacy_local = policy(Environment::Local, |c| {
        c.check_bypass = CheckBypassGate::Production;
    });
    assert!(!legacy_local.bypass_check("someone@testing.com"));

    let disabled = policy(Environment::Local, |c| c.check_bypass = CheckBypassGate::Disabled);
    assert!(!disabled.bypass_check("someone@testing.com"));
}

#[test]
fn test_empty_suffixes_never_match() {
    let local = policy(Environment::Local, |c| {
        c.debug_phone_suffix.clear();
        c.debug_email_suffix.clear();
    });
    assert!(!local.bypass_check("13812345678"));
    assert!(!local.bypass_check("user@example.com"));
}

#[test]
fn test_bypass_captcha() {
    let local = policy(Environment::Local, |_| {});
    assert!(local.bypass_captcha("captcha_skip_test"));
    assert!(!local.bypass_captcha("some-other-id"));

    let prod = policy(Environment::Production, |_| {});
    assert!(!prod.bypass_captcha("captcha_skip_test"));
}

#[test]
fn test_strict_policy_never_bypasses() {
    let strict = DebugPolicy::strict();
    assert_eq!(strict.fixed_code(), None);
    assert!(!strict.skip_delivery("00012345678"));
    assert!(!strict.bypass_check("user@testing.com"));
    assert!(!strict.bypass_captcha(""));
}

#[test]
fn test_default_config_enables_no_shortcuts() {
    let config = hub_shared::config::AppConfig::default();
    let policy = DebugPolicy::new(config.app.env, &config.verify_code, &config.captcha);

    assert_eq!(policy.fixed_code(), None);
    assert!(!policy.skip_delivery("00012345678"));
}
