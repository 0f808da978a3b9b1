use anyhow::{Context, Result, bail};
use url::Url;

/// Runtime override for the host base address.
pub const BASE_ADDRESS_ENV: &str = "ALBUMRANKING_BASE_ADDRESS";

// Compile-time fallback embedded by build.rs; blank when the build
// environment provided none.
const COMPILED_BASE_ADDRESS: &str = env!("ALBUMRANKING_BASE_ADDRESS");

/// The hosting environment as seen at startup. The only thing the host
/// requires of it is an absolute base-address origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    base_address: Url,
}

impl HostEnvironment {
    /// Discover the environment, preferring the runtime variable over the
    /// configured value over the compile-time default.
    pub fn discover(configured: Option<&str>) -> Result<Self> {
        let raw = choose(
            std::env::var(BASE_ADDRESS_ENV).ok(),
            configured,
            COMPILED_BASE_ADDRESS,
        )
        .with_context(|| {
            format!(
                "no base address available: set {} or base_address in the host configuration",
                BASE_ADDRESS_ENV
            )
        })?;
        Self::from_base_address(&raw)
    }

    /// Build an environment from an explicit base address.
    pub fn from_base_address(raw: &str) -> Result<Self> {
        let base_address =
            Url::parse(raw).with_context(|| format!("invalid base address '{}'", raw))?;

        if base_address.cannot_be_a_base() {
            bail!("base address '{}' is not an origin", raw);
        }
        match base_address.scheme() {
            "http" | "https" => {}
            other => bail!("base address scheme '{}' is not supported", other),
        }
        if base_address.host_str().is_none() {
            bail!("base address '{}' has no host", raw);
        }

        Ok(Self { base_address })
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }
}

// Pick the first non-blank source.
fn choose(env_value: Option<String>, configured: Option<&str>, compiled: &str) -> Option<String> {
    non_blank(env_value.as_deref())
        .or_else(|| non_blank(configured))
        .or_else(|| non_blank(Some(compiled)))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_wins_over_configured_and_compiled() {
        let picked = choose(
            Some("https://env.test/".into()),
            Some("https://conf.test/"),
            "https://compiled.test/",
        );
        assert_eq!(picked.as_deref(), Some("https://env.test/"));
    }

    #[test]
    fn configured_value_wins_over_compiled() {
        let picked = choose(None, Some("https://conf.test/"), "https://compiled.test/");
        assert_eq!(picked.as_deref(), Some("https://conf.test/"));
    }

    #[test]
    fn blank_sources_count_as_absent() {
        let picked = choose(Some("  ".into()), Some(""), "https://compiled.test/");
        assert_eq!(picked.as_deref(), Some("https://compiled.test/"));
        assert_eq!(choose(None, None, "   "), None);
    }

    #[test]
    fn absolute_origins_are_accepted() {
        let env = HostEnvironment::from_base_address("https://example.test/").unwrap();
        assert_eq!(env.base_address().as_str(), "https://example.test/");
    }

    #[test]
    fn non_origin_addresses_are_rejected() {
        assert!(HostEnvironment::from_base_address("mailto:nobody@example.test").is_err());
        assert!(HostEnvironment::from_base_address("albums/ranked").is_err());
        assert!(HostEnvironment::from_base_address("ftp://example.test/").is_err());
    }
}
