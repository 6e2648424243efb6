#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;

use std::future::Future;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::DeliveryError;

/// Something that can put a text message in front of the user.
pub trait Notifier {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

#[derive(Clone)]
pub struct TelegramNotifier {
    http: HttpClient,
    endpoint: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(cfg: &AppConfig) -> Result<Self, DeliveryError> {
        let http = HttpClient::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(DeliveryError::from_reqwest)?;
        let endpoint = format!(
            "{}/bot{}/sendMessage",
            cfg.telegram_api_base.as_str().trim_end_matches('/'),
            cfg.telegram_token
        );
        Ok(Self { http, endpoint, chat_id: cfg.telegram_chat_id.clone() })
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let body = SendMessageRequest { chat_id: &self.chat_id, text };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(DeliveryError::from_reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(DeliveryError::from_reqwest)?;
        check_reply(status, &bytes)
    }
}

fn check_reply(status: reqwest::StatusCode, body: &[u8]) -> Result<(), DeliveryError> {
    let reply = serde_json::from_slice::<SendMessageReply>(body).ok();
    match reply {
        Some(r) if status.is_success() && r.ok => Ok(()),
        Some(SendMessageReply { description: Some(desc), .. }) => Err(DeliveryError::Rejected(desc)),
        _ if !status.is_success() => Err(DeliveryError::Status(status)),
        _ => Err(DeliveryError::Rejected("unexpected sendMessage reply".to_string())),
    }
}

/// Records what it was asked to send; queued outcomes are consumed first.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockNotifier {
    outcomes: Mutex<VecDeque<Result<(), DeliveryError>>>,
    sent: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_outcome(&self, outcome: Result<(), DeliveryError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for MockNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(text.to_string());
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
