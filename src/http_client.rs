use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use url::Url;

/// User-Agent sent on every request issued through a client descriptor.
pub const USER_AGENT_VALUE: &str = "AlbumRanking";

// The default header map is constant for the life of the process.
static DEFAULT_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
});

pub fn default_headers() -> &'static HeaderMap {
    &DEFAULT_HEADERS
}

/// Pre-configured HTTP client bound to the host's base address.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_address: Url,
    headers: HeaderMap,
    client: reqwest::Client,
}

// Descriptors compare by configuration; the underlying connection pool
// is not part of a descriptor's identity.
impl PartialEq for HttpClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_address == other.base_address && self.headers == other.headers
    }
}

impl HttpClient {
    fn new(base_address: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .tcp_keepalive(Some(Duration::from_secs(10)))
            .timeout(Duration::from_secs(30))
            .default_headers(DEFAULT_HEADERS.clone())
            .build()
            .context("failed to construct HTTP client")?;

        Ok(Self {
            base_address,
            headers: DEFAULT_HEADERS.clone(),
            client,
        })
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Resolve a path against the base address.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base_address
            .join(path)
            .with_context(|| format!("cannot resolve '{}' against {}", path, self.base_address))
    }

    pub fn get(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self.client.get(self.url_for(path)?))
    }

    pub fn post(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        Ok(self.client.post(self.url_for(path)?))
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

/// Recipe for producing client descriptors. Each call yields a fresh
/// instance; all instances from one factory are value-equivalent.
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    base_address: Url,
}

impl HttpClientFactory {
    pub fn new(base_address: Url) -> Self {
        Self { base_address }
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn create(&self) -> Result<HttpClient> {
        HttpClient::new(self.base_address.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> HttpClientFactory {
        HttpClientFactory::new(Url::parse("https://example.test/").unwrap())
    }

    #[test]
    fn descriptor_keeps_the_factory_base_address() {
        let client = factory().create().unwrap();
        assert_eq!(client.base_address().as_str(), "https://example.test/");
    }

    #[test]
    fn header_map_has_exactly_one_constant_entry() {
        let client = factory().create().unwrap();
        assert_eq!(client.headers().len(), 1);
        assert_eq!(
            client.headers().get(USER_AGENT).unwrap(),
            &HeaderValue::from_static("AlbumRanking")
        );
    }

    #[test]
    fn repeated_creation_yields_equal_but_distinct_descriptors() {
        let factory = factory();
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();
        assert_eq!(a, b);
        assert!(!std::ptr::eq(&a, &b));
    }

    #[test]
    fn paths_resolve_against_the_base_address() {
        let client = factory().create().unwrap();
        let url = client.url_for("api/albums").unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/albums");
    }
}
