#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;

use std::future::Future;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::error::FetchError;

/// Source of homework status payloads.
pub trait StatusApi {
    /// Fetch statuses updated since `from_date` (Unix seconds) as decoded JSON.
    fn homework_statuses(&self, from_date: i64) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: HttpClient,
    endpoint: Url,
    token: String,
}

impl PracticumClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(cfg.http_timeout)
            .build()
            .map_err(FetchError::from_reqwest)?;
        Ok(Self { http, endpoint: cfg.endpoint.clone(), token: cfg.practicum_token.clone() })
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

impl StatusApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, self.auth_header())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }
        response.json::<Value>().await.map_err(FetchError::from_reqwest)
    }
}

/// Replays queued payloads and records every `from_date` it was asked for.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockStatusApi {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    calls: Mutex<Vec<i64>>,
}

#[cfg(test)]
impl MockStatusApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, resp: Result<Value, FetchError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl StatusApi for MockStatusApi {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(from_date);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Timeout))
    }
}
