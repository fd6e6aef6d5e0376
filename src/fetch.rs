//! Outbound link validation and page-title fetching
//!
//! Both outbound calls the service makes live behind the [`LinkProbe`]
//! trait so handlers can be tested with a stub instead of the network:
//! - a HEAD request that decides whether a link is reachable
//! - a GET request that extracts the page's `<title>` text
//!
//! The production implementation carries explicit request and connect
//! timeouts so a slow target cannot stall a request indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;

/// Request timeout for outbound HEAD/GET calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect timeout for outbound HEAD/GET calls
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure of an outbound title fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("title fetch failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound capability used by the create and update handlers
#[async_trait]
pub trait LinkProbe: Send + Sync {
    /// Returns true iff a HEAD request to `url` succeeds with a status
    /// below 400
    async fn validate_link(&self, url: &str) -> bool;

    /// GETs `url`, parses the body as HTML and returns the first `<title>`
    /// element's text; `Ok("")` when the document has no title element
    async fn fetch_title(&self, url: &str) -> Result<String, FetchError>;
}

/// [`LinkProbe`] backed by a shared `reqwest::Client`
pub struct HttpLinkProbe {
    client: Client,
}

impl HttpLinkProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("bookmarks/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkProbe for HttpLinkProbe {
    async fn validate_link(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status().as_u16() < 400,
            Err(_) => false,
        }
    }

    async fn fetch_title(&self, url: &str) -> Result<String, FetchError> {
        // The response status is deliberately not inspected: an error page
        // that carries a <title> still yields that title.
        let body = self.client.get(url).send().await?.text().await?;
        Ok(extract_title(&body))
    }
}

/// Extracts the text of the first `<title>` element in document order
///
/// Returns an empty string when the document has no title element anywhere
/// in the tree.
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_simple_title() {
        let html = "<html><head><title>Example Domain</title></head><body></body></html>";
        assert_eq!(extract_title(html), "Example Domain");
    }

    #[test]
    fn first_title_wins() {
        let html = "<title>First</title><svg><title>Second</title></svg>";
        assert_eq!(extract_title(html), "First");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let html = "<title>\n  Padded Title  \n</title>";
        assert_eq!(extract_title(html), "Padded Title");
    }

    #[test]
    fn missing_title_yields_empty_string() {
        assert_eq!(extract_title("<html><body><p>no title</p></body></html>"), "");
    }

    #[test]
    fn empty_document_yields_empty_string() {
        assert_eq!(extract_title(""), "");
    }
}
