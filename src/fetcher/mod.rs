pub mod http_fetcher;
pub mod redirect;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use redirect::{fetch_following_redirects, DEFAULT_MAX_REDIRECTS};

/// A single HTTP exchange. Redirects are never followed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Location` header, if any
    pub location: Option<String>,
    /// Only populated for 200 responses
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Fetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}
