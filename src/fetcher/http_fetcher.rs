use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};

use crate::app::Result;
use crate::config::FeedConfig;
use crate::fetcher::{Fetcher, HttpResponse};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .redirect(Policy::none())
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = if status == StatusCode::OK {
            response.bytes().await?.to_vec()
        } else {
            Vec::new()
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            location,
            body,
        })
    }
}
