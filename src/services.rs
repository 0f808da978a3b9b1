use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

use crate::http_client::{HttpClient, HttpClientFactory};

/// Process-scoped registry of service factories, filled once at startup
/// and queried for the life of the host.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    http_client: Option<HttpClientFactory>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_http_client(&mut self, factory: HttpClientFactory) {
        self.http_client = Some(factory);
    }

    pub fn http_client_factory(&self) -> Option<&HttpClientFactory> {
        self.http_client.as_ref()
    }

    /// Open a new logical operation scope.
    pub fn create_scope(&self) -> Scope<'_> {
        Scope {
            registry: self,
            http_client: OnceCell::new(),
        }
    }
}

/// One logical operation scope. A scoped service is created on first
/// acquisition and reused until the scope is dropped; scopes never share
/// instances with each other.
#[derive(Debug)]
pub struct Scope<'a> {
    registry: &'a ServiceRegistry,
    http_client: OnceCell<HttpClient>,
}

impl Scope<'_> {
    pub fn http_client(&self) -> Result<&HttpClient> {
        let factory = self
            .registry
            .http_client
            .as_ref()
            .context("no HTTP client factory registered")?;
        self.http_client.get_or_try_init(|| factory.create())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn registry() -> ServiceRegistry {
        let mut registry = ServiceRegistry::new();
        registry.register_http_client(HttpClientFactory::new(
            Url::parse("https://example.test/").unwrap(),
        ));
        registry
    }

    #[test]
    fn a_scope_reuses_its_client() {
        let registry = registry();
        let scope = registry.create_scope();
        let first = scope.http_client().unwrap() as *const HttpClient;
        let second = scope.http_client().unwrap() as *const HttpClient;
        assert_eq!(first, second);
    }

    #[test]
    fn separate_scopes_get_separate_but_equal_clients() {
        let registry = registry();
        let scope_a = registry.create_scope();
        let scope_b = registry.create_scope();
        let a = scope_a.http_client().unwrap();
        let b = scope_b.http_client().unwrap();
        assert!(!std::ptr::eq(a, b));
        assert_eq!(a, b);
    }

    #[test]
    fn acquiring_an_unregistered_service_fails() {
        let registry = ServiceRegistry::new();
        let scope = registry.create_scope();
        assert!(scope.http_client().is_err());
    }
}
