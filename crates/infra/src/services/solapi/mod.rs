use super::IDispatchGateway;
use crate::config::DispatchSettings;
use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use playground_scheduler_utils::create_random_secret;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::time::Duration;

const SEND_MANY_URL: &str = "https://api.solapi.com/messages/v4/send-many";
const SALT_LEN: usize = 16;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One Alimtalk reminder addressed to a single recipient. The sender
/// identity and channel profile are filled in by the client that owns the
/// credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct AlimtalkMessage {
    pub to: String,
    pub template_id: String,
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub to: String,
    pub delivered: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody<'a> {
    to: &'a str,
    from: &'a str,
    kakao_options: KakaoOptionsBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KakaoOptionsBody<'a> {
    pf_id: &'a str,
    template_id: &'a str,
    variables: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct SendManyRequest<'a> {
    messages: Vec<MessageBody<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendManyResponse {
    #[serde(default)]
    failed_message_list: Vec<FailedMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FailedMessage {
    to: String,
    #[serde(default)]
    status_message: String,
}

/// Solapi REST client for Kakao Alimtalk batches
pub struct SolapiClient {
    settings: DispatchSettings,
    client: reqwest::Client,
}

impl SolapiClient {
    pub fn new(settings: DispatchSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// `HMAC-SHA256 apiKey=.., date=.., salt=.., signature=..` where the
    /// signature covers date + salt
    fn authorization_header(&self) -> String {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let salt = create_random_secret(SALT_LEN);
        let mut mac = Hmac::<Sha256>::new_from_slice(self.settings.api_secret.as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(date.as_bytes());
        mac.update(salt.as_bytes());
        let signature = mac
            .finalize()
            .into_bytes()
            .iter()
            .fold(String::new(), |mut acc, byte| {
                let _ = write!(acc, "{:02x}", byte);
                acc
            });
        format!(
            "HMAC-SHA256 apiKey={}, date={}, salt={}, signature={}",
            self.settings.api_key, date, salt, signature
        )
    }
}

#[async_trait::async_trait]
impl IDispatchGateway for SolapiClient {
    async fn send_batch(
        &self,
        messages: Vec<AlimtalkMessage>,
    ) -> anyhow::Result<Vec<DeliveryOutcome>> {
        let body = SendManyRequest {
            messages: messages
                .iter()
                .map(|m| MessageBody {
                    to: &m.to,
                    from: &self.settings.sender,
                    kakao_options: KakaoOptionsBody {
                        pf_id: &self.settings.kakao_pf_id,
                        template_id: &m.template_id,
                        variables: &m.variables,
                    },
                })
                .collect(),
        };

        let res = self
            .client
            .post(SEND_MANY_URL)
            .header("Authorization", self.authorization_header())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("Dispatch gateway returned status: {}", res.status());
        }

        let parsed: SendManyResponse = res.json().await?;
        for failed in &parsed.failed_message_list {
            tracing::warn!(
                "Alimtalk to {} was rejected by the provider: {}",
                failed.to,
                failed.status_message
            );
        }
        let failed: HashSet<String> = parsed
            .failed_message_list
            .into_iter()
            .map(|f| f.to)
            .collect();

        Ok(messages
            .into_iter()
            .map(|m| DeliveryOutcome {
                delivered: !failed.contains(&m.to),
                to: m.to,
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn client() -> SolapiClient {
        SolapiClient::new(DispatchSettings {
            api_key: "test-key".into(),
            api_secret: "test-secret".into(),
            sender: "01012345678".into(),
            kakao_pf_id: "pf-id".into(),
        })
    }

    #[test]
    fn it_builds_a_signed_authorization_header() {
        let header = client().authorization_header();
        assert!(header.starts_with("HMAC-SHA256 apiKey=test-key, date="));
        let signature = header.split("signature=").nth(1).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn it_serializes_messages_in_the_provider_format() {
        let client = client();
        let mut variables = HashMap::new();
        variables.insert("#{venue}".to_string(), "Seoul Stadium".to_string());
        let message = AlimtalkMessage {
            to: "01000000000".into(),
            template_id: "pg-reminder-d1".into(),
            variables,
        };

        let body = MessageBody {
            to: &message.to,
            from: &client.settings.sender,
            kakao_options: KakaoOptionsBody {
                pf_id: &client.settings.kakao_pf_id,
                template_id: &message.template_id,
                variables: &message.variables,
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["to"], "01000000000");
        assert_eq!(json["from"], "01012345678");
        assert_eq!(json["kakaoOptions"]["pfId"], "pf-id");
        assert_eq!(json["kakaoOptions"]["templateId"], "pg-reminder-d1");
        assert_eq!(json["kakaoOptions"]["variables"]["#{venue}"], "Seoul Stadium");
    }

    #[test]
    fn it_parses_failed_message_lists() {
        let parsed: SendManyResponse = serde_json::from_str(
            r#"{"groupId": "G4V1", "failedMessageList": [{"to": "01000000000", "statusMessage": "invalid number"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.failed_message_list.len(), 1);
        assert_eq!(parsed.failed_message_list[0].to, "01000000000");
    }
}
