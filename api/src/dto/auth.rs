use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use hub_shared::config::CAPTCHA_ANSWER_LENGTH;
use hub_shared::subject::is_valid_email;

static ELEVEN_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{11}$").unwrap());

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Phone must be present and exactly eleven digits
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(rule_error("required", "手机号为必填项，参数名称phone"));
    }
    if !ELEVEN_DIGITS.is_match(phone) {
        return Err(rule_error("digits", "手机号长度必须为11位的数字"));
    }
    Ok(())
}

/// Email must be present, 4 to 30 characters and well formed
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let length = email.chars().count();
    if email.is_empty() {
        return Err(rule_error("required", "Email为必填项"));
    }
    if length < 4 {
        return Err(rule_error("min", "Email长度需要大于4"));
    }
    if length > 30 {
        return Err(rule_error("max", "Email长度需小于30"));
    }
    if !is_valid_email(email) {
        return Err(rule_error("email", "Email格式不正确，请提供有效的邮箱地址"));
    }
    Ok(())
}

fn validate_captcha_id(captcha_id: &str) -> Result<(), ValidationError> {
    if captcha_id.is_empty() {
        return Err(rule_error("required", "图片验证码的ID为必填"));
    }
    Ok(())
}

fn validate_captcha_answer(answer: &str) -> Result<(), ValidationError> {
    if answer.is_empty() {
        return Err(rule_error("required", "图片验证码答案必填"));
    }
    if answer.len() != CAPTCHA_ANSWER_LENGTH || !answer.chars().all(|c| c.is_ascii_digit()) {
        return Err(rule_error("digits", "图片验证码答案长度必须为6位的数字"));
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.is_empty() {
        return Err(rule_error("required", "手机号或Email为必填项，参数名称subject"));
    }
    Ok(())
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(rule_error("required", "验证码答案必填"));
    }
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(rule_error("digits", "验证码必须为数字"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhoneExistRequest {
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailExistRequest {
    #[serde(default)]
    #[validate(custom = "validate_email_address")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendPhoneCodeRequest {
    #[serde(default)]
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[serde(default)]
    #[validate(custom = "validate_captcha_id")]
    pub captcha_id: String,

    #[serde(default)]
    #[validate(custom = "validate_captcha_answer")]
    pub captcha_answer: String,
}

/// Check a previously issued code for a phone number or email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckCodeRequest {
    #[serde(default)]
    #[validate(custom = "validate_subject")]
    pub subject: String,

    #[serde(default)]
    #[validate(custom = "validate_code")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistResponse {
    pub exist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckCodeResponse {
    pub matched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &validator::ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|list| {
                list.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_phone_rules() {
        let ok = PhoneExistRequest {
            phone: "13812345678".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = PhoneExistRequest {
            phone: String::new(),
        };
        let errors = empty.validate().unwrap_err();
        assert_eq!(messages(&errors, "phone"), vec!["手机号为必填项，参数名称phone"]);

        let short = PhoneExistRequest {
            phone: "1381234".to_string(),
        };
        let errors = short.validate().unwrap_err();
        assert_eq!(messages(&errors, "phone"), vec!["手机号长度必须为11位的数字"]);

        let letters = PhoneExistRequest {
            phone: "1381234567a".to_string(),
        };
        assert!(letters.validate().is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(EmailExistRequest {
            email: "john@example.com".to_string()
        }
        .validate()
        .is_ok());

        let short = EmailExistRequest {
            email: "a@b".to_string(),
        };
        let errors = short.validate().unwrap_err();
        assert_eq!(messages(&errors, "email"), vec!["Email长度需要大于4"]);

        let long = EmailExistRequest {
            email: format!("{}@example.com", "x".repeat(30)),
        };
        let errors = long.validate().unwrap_err();
        assert_eq!(messages(&errors, "email"), vec!["Email长度需小于30"]);

        let malformed = EmailExistRequest {
            email: "not-an-email".to_string(),
        };
        let errors = malformed.validate().unwrap_err();
        assert_eq!(
            messages(&errors, "email"),
            vec!["Email格式不正确，请提供有效的邮箱地址"]
        );
    }

    #[test]
    fn test_send_phone_code_reports_every_field() {
        let request = SendPhoneCodeRequest {
            phone: String::new(),
            captcha_id: String::new(),
            captcha_answer: "12ab".to_string(),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("captcha_id"));
        assert_eq!(
            messages(&errors, "captcha_answer"),
            vec!["图片验证码答案长度必须为6位的数字"]
        );
    }

    #[test]
    fn test_captcha_answer_length_follows_configured_rule() {
        let request = |answer: &str| SendPhoneCodeRequest {
            phone: "13812345678".to_string(),
            captcha_id: "captcha-id".to_string(),
            captcha_answer: answer.to_string(),
        };

        assert!(request(&"7".repeat(CAPTCHA_ANSWER_LENGTH)).validate().is_ok());
        assert!(request(&"7".repeat(CAPTCHA_ANSWER_LENGTH + 1)).validate().is_err());
        assert!(request(&"7".repeat(CAPTCHA_ANSWER_LENGTH - 1)).validate().is_err());
    }

    #[test]
    fn test_check_code_rules() {
        let ok = CheckCodeRequest {
            subject: "john@testing.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = CheckCodeRequest {
            subject: String::new(),
            code: "12x".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("subject"));
        assert!(errors.field_errors().contains_key("code"));
    }
}
