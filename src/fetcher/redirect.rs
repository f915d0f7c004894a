use url::Url;

use crate::app::{Result, TidingsError};
use crate::fetcher::Fetcher;

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// GET `url`, following 301/302/303/307 by hand until a 200 arrives.
///
/// Relative `Location` values are resolved against the URL that produced
/// them. Any other status ends the loop with an error.
pub async fn fetch_following_redirects(
    fetcher: &(dyn Fetcher + Send + Sync),
    url: &str,
    max_redirects: usize,
) -> Result<Vec<u8>> {
    let mut current = Url::parse(url)?;
    let mut redirects = 0;

    loop {
        let response = fetcher.get(current.as_str()).await?;

        match response.status {
            200 => return Ok(response.body),
            301 | 302 | 303 | 307 => {
                if redirects == max_redirects {
                    return Err(TidingsError::TooManyRedirects(redirects));
                }
                redirects += 1;

                let next = response
                    .location
                    .as_deref()
                    .and_then(|location| current.join(location).ok())
                    .ok_or_else(|| TidingsError::MissingLocation(current.to_string()))?;

                tracing::debug!(
                    "{} redirected ({}) to {}",
                    current,
                    response.status,
                    next
                );
                current = next;
            }
            status => {
                return Err(TidingsError::UnexpectedStatus {
                    status,
                    url: current.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::fetcher::HttpResponse;

    /// Answers from a fixed url -> response table and records every call.
    struct ScriptedFetcher {
        responses: HashMap<String, HttpResponse>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<(&str, HttpResponse)>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|(url, response)| (url.to_string(), response))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.calls.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| TidingsError::Other(format!("no route for {url}")))
        }
    }

    fn redirect(status: u16, location: &str) -> HttpResponse {
        HttpResponse {
            status,
            location: Some(location.to_string()),
            body: Vec::new(),
        }
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            location: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_follows_redirect_chain_in_order() {
        let fetcher = ScriptedFetcher::new(vec![
            ("https://a.example/feed", redirect(302, "https://b.example/feed")),
            ("https://b.example/feed", redirect(301, "https://c.example/feed")),
            ("https://c.example/feed", ok("<rss/>")),
        ]);

        let body = fetch_following_redirects(&fetcher, "https://a.example/feed", 10)
            .await
            .unwrap();

        assert_eq!(body, b"<rss/>");
        assert_eq!(
            fetcher.calls(),
            vec![
                "https://a.example/feed",
                "https://b.example/feed",
                "https://c.example/feed"
            ]
        );
    }

    #[tokio::test]
    async fn test_relative_location_and_other_redirect_codes() {
        let fetcher = ScriptedFetcher::new(vec![
            ("https://a.example/feed", redirect(303, "/moved")),
            ("https://a.example/moved", redirect(307, "final")),
            ("https://a.example/final", ok("done")),
        ]);

        let body = fetch_following_redirects(&fetcher, "https://a.example/feed", 10)
            .await
            .unwrap();
        assert_eq!(body, b"done");
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_redirect_loop_is_bounded() {
        let fetcher = ScriptedFetcher::new(vec![
            ("https://a.example/x", redirect(302, "https://a.example/y")),
            ("https://a.example/y", redirect(302, "https://a.example/x")),
        ]);

        let err = fetch_following_redirects(&fetcher, "https://a.example/x", 3)
            .await
            .unwrap_err();

        assert!(matches!(err, TidingsError::TooManyRedirects(3)));
        assert_eq!(fetcher.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_unexpected_status_stops() {
        let fetcher = ScriptedFetcher::new(vec![(
            "https://a.example/feed",
            HttpResponse {
                status: 404,
                location: None,
                body: Vec::new(),
            },
        )]);

        let err = fetch_following_redirects(&fetcher, "https://a.example/feed", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, TidingsError::UnexpectedStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_permanent_redirect_308_is_not_followed() {
        let fetcher = ScriptedFetcher::new(vec![(
            "https://a.example/feed",
            redirect(308, "https://b.example/feed"),
        )]);

        let err = fetch_following_redirects(&fetcher, "https://a.example/feed", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, TidingsError::UnexpectedStatus { status: 308, .. }));
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_redirect_without_location() {
        let fetcher = ScriptedFetcher::new(vec![(
            "https://a.example/feed",
            HttpResponse {
                status: 302,
                location: None,
                body: Vec::new(),
            },
        )]);

        let err = fetch_following_redirects(&fetcher, "https://a.example/feed", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, TidingsError::MissingLocation(_)));
    }

    #[tokio::test]
    async fn test_malformed_url() {
        let fetcher = ScriptedFetcher::new(Vec::new());
        let err = fetch_following_redirects(&fetcher, "not a url", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, TidingsError::InvalidUrl(_)));
        assert!(fetcher.calls().is_empty());
    }
}
