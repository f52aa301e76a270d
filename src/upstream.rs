//! Client for the placeholder API
//!
//! The dashboard has no backend of its own, a public placeholder API stands in for it. Only the
//! `/posts` resource is used.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Upstream errors
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL can not have paths appended
    #[error("Invalid upstream URL: {0}")]
    InvalidBase(Url),

    /// Sending the request or reading the response failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type for all upstream interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Generic list item of the placeholder API
#[derive(Clone, Debug, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// Payload to create an item
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateItemPayload<'a> {
    title: &'a str,
    body: &'a str,
    user_id: i64,
}

/// Response on creating an item
#[derive(Debug, Deserialize)]
struct CreatedItem {
    id: i64,
}

/// User the created items belong to
const USER_ID: i64 = 1;

/// The placeholder API
#[derive(Clone, Debug)]
pub struct Upstream {
    /// HTTP client, shares its connection pool between clones
    client: Client,

    /// Base URL, `/posts` is appended
    base: Url,
}

impl Upstream {
    /// Create a client for the API at `base`
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBase(base));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("canary/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// Fetch a limited list of items
    pub async fn fetch_items(&self, limit: usize) -> Result<Vec<Item>> {
        let items = self
            .client
            .get(self.endpoint(&["posts"]))
            .query(&[("_limit", limit)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Item>>()
            .await?;

        tracing::debug!("Fetched {} items from upstream", items.len());

        Ok(items)
    }

    /// Fetch a single item
    pub async fn fetch_item(&self, id: i64) -> Result<Item> {
        let id = id.to_string();

        let item = self
            .client
            .get(self.endpoint(&["posts", id.as_str()]))
            .send()
            .await?
            .error_for_status()?
            .json::<Item>()
            .await?;

        Ok(item)
    }

    /// Search the items, only the success of the call matters
    pub async fn search(&self, query: &str) -> Result<()> {
        self.client
            .get(self.endpoint(&["posts"]))
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Item>>()
            .await?;

        Ok(())
    }

    /// Create an item, returns the ID handed out by the API
    pub async fn create_item(&self, title: &str, body: &str) -> Result<i64> {
        let payload = CreateItemPayload {
            title,
            body,
            user_id: USER_ID,
        };

        let created = self
            .client
            .post(self.endpoint(&["posts"]))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<CreatedItem>()
            .await?;

        tracing::debug!("Upstream created item {}", created.id);

        Ok(created.id)
    }

    /// URL of a resource below the base
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();

        // checked on creation, the base can have segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Upstream {
        Upstream::new(base.parse().unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint() {
        let upstream = client("https://jsonplaceholder.typicode.com");
        assert_eq!(
            "https://jsonplaceholder.typicode.com/posts/1",
            upstream.endpoint(&["posts", "1"]).as_str()
        );

        let upstream = client("http://localhost:3000/api/");
        assert_eq!(
            "http://localhost:3000/api/posts",
            upstream.endpoint(&["posts"]).as_str()
        );
    }

    #[test]
    fn test_invalid_base() {
        let result = Upstream::new("mailto:john@canary.com".parse().unwrap(), Duration::ZERO);

        assert!(matches!(result, Err(Error::InvalidBase(_))));
    }
}
