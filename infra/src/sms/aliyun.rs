//! Aliyun (Dysmsapi) SMS delivery
//!
//! Calls the `SendSms` action of API version 2017-05-25. Requests are signed
//! with ACS3-HMAC-SHA256: a canonical request over the query string and the
//! `host`/`x-acs-*` headers is hashed, and the hash is signed with the
//! access key secret.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use hub_core::services::verification::{DeliveryChannel, SmsMessage};
use hub_shared::config::AliyunSmsConfig;
use hub_shared::subject::mask_subject;

use crate::InfrastructureError;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_ALGORITHM: &str = "ACS3-HMAC-SHA256";
const API_ACTION: &str = "SendSms";
const API_VERSION: &str = "2017-05-25";

/// Response body of `SendSms`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsResponse {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub biz_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// A request ready to be sent
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// Aliyun SMS delivery channel
pub struct AliyunSms {
    config: AliyunSmsConfig,
    client: reqwest::Client,
}

impl AliyunSms {
    pub fn new(config: AliyunSmsConfig) -> Result<Self, InfrastructureError> {
        if config.access_key_id.is_empty() || config.access_key_secret.is_empty() {
            return Err(InfrastructureError::Config(
                "Aliyun SMS requires access_key_id and access_key_secret".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self { config, client })
    }

    /// Send a templated message, returning the provider's BizId
    pub async fn send_message(
        &self,
        phone: &str,
        message: &SmsMessage,
    ) -> Result<String, InfrastructureError> {
        let template = if message.template.is_empty() {
            self.config.template_code.as_str()
        } else {
            message.template.as_str()
        };
        let template_param = serde_json::to_string(&message.data)
            .map_err(|e| InfrastructureError::Sms(format!("Invalid template data: {}", e)))?;

        let mut params = BTreeMap::new();
        params.insert("PhoneNumbers".to_string(), phone.to_string());
        params.insert("SignName".to_string(), self.config.sign_name.clone());
        params.insert("TemplateCode".to_string(), template.to_string());
        params.insert("TemplateParam".to_string(), template_param);

        let signed = self.sign_request(&params, Utc::now(), &Uuid::new_v4().to_string())?;

        let mut request = self.client.post(&signed.url);
        for (name, value) in &signed.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: SendSmsResponse = serde_json::from_str(&body).map_err(|e| {
            InfrastructureError::Sms(format!(
                "Unexpected response (HTTP {}): {}: {}",
                status, e, body
            ))
        })?;

        if parsed.code != "OK" {
            return Err(InfrastructureError::Sms(format!(
                "{}: {} (request {})",
                parsed.code,
                parsed.message,
                parsed.request_id.unwrap_or_default()
            )));
        }

        Ok(parsed.biz_id.unwrap_or_default())
    }

    /// Build the URL and signed headers for a `SendSms` call
    pub fn sign_request(
        &self,
        params: &BTreeMap<String, String>,
        date: DateTime<Utc>,
        nonce: &str,
    ) -> Result<SignedRequest, InfrastructureError> {
        let query = canonical_query(params);
        let payload_hash = hex::encode(Sha256::digest(b""));

        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), self.config.endpoint.clone());
        headers.insert("x-acs-action".to_string(), API_ACTION.to_string());
        headers.insert("x-acs-content-sha256".to_string(), payload_hash.clone());
        headers.insert(
            "x-acs-date".to_string(),
            date.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );
        headers.insert("x-acs-signature-nonce".to_string(), nonce.to_string());
        headers.insert("x-acs-version".to_string(), API_VERSION.to_string());

        let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
            .collect();

        let canonical_request = format!(
            "POST\n/\n{}\n{}\n{}\n{}",
            query, canonical_headers, signed_headers, payload_hash
        );
        let string_to_sign = format!(
            "{}\n{}",
            SIGNATURE_ALGORITHM,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let mut mac = HmacSha256::new_from_slice(self.config.access_key_secret.as_bytes())
            .map_err(|e| InfrastructureError::Config(format!("Invalid access key secret: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        headers.insert(
            "Authorization".to_string(),
            format!(
                "{} Credential={},SignedHeaders={},Signature={}",
                SIGNATURE_ALGORITHM, self.config.access_key_id, signed_headers, signature
            ),
        );

        Ok(SignedRequest {
            url: format!("https://{}/?{}", self.config.endpoint, query),
            headers,
        })
    }
}

/// Sorted, RFC 3986 encoded `key=value` pairs
pub(crate) fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl DeliveryChannel for AliyunSms {
    async fn send(&self, subject: &str, message: &SmsMessage) -> bool {
        match self.send_message(subject, message).await {
            Ok(biz_id) => {
                tracing::info!(
                    target: "sms_service",
                    provider = "aliyun",
                    phone = %mask_subject(subject),
                    biz_id = %biz_id,
                    "SMS sent successfully"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    target: "sms_service",
                    provider = "aliyun",
                    phone = %mask_subject(subject),
                    error = %e,
                    "Failed to send SMS"
                );
                false
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Aliyun"
    }
}
