//! HTTP client management and fetching
//!
//! One `reqwest::Client` is created lazily per distinct host and shared by
//! every task targeting that host for the rest of the run. Clients never
//! follow redirects at the transport level; 301/302 responses surface as a
//! distinct [`FetchOutcome`] so the engine can route the target back through
//! the claim step.

use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a single fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with its payload
    Success {
        /// Raw response body
        data: Vec<u8>,
        /// Declared media type, parameters stripped
        media_type: Option<String>,
    },

    /// 301 or 302 response; `target` is the raw `Location` header if present
    Redirect { status: u16, target: Option<String> },

    /// Any other failure: non-success status, timeout, connection error
    Failed { reason: String },
}

/// Builds one host client with the registry's fixed configuration
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("linkdive/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(Policy::none()) // redirect hops are resolved by the engine
        .gzip(true)
        .brotli(true)
        .build()
}

/// Lazily creates and shares one HTTP client per host
///
/// Creation is synchronized: concurrent first requests for the same host
/// observe a single client. Clients are read-only once created; the returned
/// handle is a cheap clone sharing the host's connection pool.
#[derive(Debug)]
pub struct ClientRegistry {
    timeout: Duration,
    clients: Mutex<HashMap<String, Client>>,
}

impl ClientRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client for `host`, creating it on first use
    pub fn get_or_create(&self, host: &str) -> Result<Client, reqwest::Error> {
        let mut clients = self.clients.lock().unwrap();
        if let Some(client) = clients.get(host) {
            return Ok(client.clone());
        }
        let client = build_http_client(self.timeout)?;
        clients.insert(host.to_string(), client.clone());
        Ok(client)
    }

    /// Number of distinct hosts a client has been created for
    pub fn host_count(&self) -> usize {
        self.clients.lock().unwrap().len()
    }
}

/// Issues one GET request and classifies the outcome
pub async fn fetch(client: &Client, location: &Url) -> FetchOutcome {
    let response = match client.get(location.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchOutcome::Failed { reason };
        }
    };

    let status = response.status();
    if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
        let target = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        return FetchOutcome::Redirect {
            status: status.as_u16(),
            target,
        };
    }

    if !status.is_success() {
        return FetchOutcome::Failed {
            reason: format!("HTTP {}", status),
        };
    }

    let media_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());

    match response.bytes().await {
        Ok(data) => FetchOutcome::Success {
            data: data.to_vec(),
            media_type,
        },
        Err(e) => FetchOutcome::Failed {
            reason: format!("failed to read body: {}", e),
        },
    }
}
