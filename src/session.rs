use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, ClientBuilder};

use crate::error::Result;

/// Wrapper around the configured HTTP client used to fetch resolved images.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    user_agent: String,
}

/// Minimal data required to build an HTTP session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(user_agent: String, timeout: Duration) -> Self {
        Self {
            user_agent,
            timeout,
        }
    }
}

impl HttpSession {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        default_headers.insert(
            ACCEPT,
            HeaderValue::from_static("image/avif,image/webp,image/*,*/*;q=0.8"),
        );

        let client = ClientBuilder::new()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
