use std::future::Future;

use anyhow::Result;
use log::{debug, info, warn};

use crate::components::{RootComponent, selector_matches};
use crate::config::HostConfig;
use crate::environment::HostEnvironment;
use crate::http_client::HttpClientFactory;
use crate::services::ServiceRegistry;

/// Accumulates startup registrations and produces a runnable host.
///
/// Registrations are recorded as-is; every check that can fail is
/// deferred to [`HostBuilder::build`], which is the single fatal
/// checkpoint of startup.
pub struct HostBuilder {
    args: Vec<String>,
    config: Option<HostConfig>,
    root_components: Vec<RootComponent>,
    scoped_http_client: bool,
}

impl HostBuilder {
    /// Default builder for the given process arguments. Arguments are
    /// carried through to the host without interpretation.
    pub fn create_default(args: Vec<String>) -> Self {
        Self {
            args,
            config: None,
            root_components: Vec::new(),
            scoped_http_client: false,
        }
    }

    /// Use an explicit configuration instead of loading the manifest.
    pub fn config(mut self, config: HostConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Register a top-level component at a mount-point selector. The
    /// selector is not validated here; one with no match in the hosting
    /// page surfaces at mount time as absent content.
    pub fn root_component(mut self, name: &str, selector: &str) -> Self {
        self.root_components.push(RootComponent::new(name, selector));
        self
    }

    /// Register the HTTP client service with per-operation-scope reuse.
    pub fn scoped_http_client(mut self) -> Self {
        self.scoped_http_client = true;
        self
    }

    /// Resolve every registration into a runnable host. An unusable
    /// configuration or an environment without a base address aborts
    /// startup here; nothing is mounted and no service instance exists
    /// once this returns an error.
    pub fn build(self) -> Result<Host> {
        let config = match self.config {
            Some(config) => config,
            None => HostConfig::load()?,
        };
        let environment = HostEnvironment::discover(config.base_address.as_deref())?;

        let mut services = ServiceRegistry::new();
        if self.scoped_http_client {
            services.register_http_client(HttpClientFactory::new(
                environment.base_address().clone(),
            ));
        }

        info!(
            "host built: base address {}, {} root component(s)",
            environment.base_address(),
            self.root_components.len()
        );

        Ok(Host {
            args: self.args,
            config,
            environment,
            root_components: self.root_components,
            services,
            state: HostState::NotStarted,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    NotStarted,
    Running,
    Terminated,
}

/// Outcome of resolving one root component against the hosting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOutcome {
    pub component: String,
    pub selector: String,
    pub mounted: bool,
}

/// A built host: resolved environment, mount registrations, and the
/// service registry, plus the run loop.
pub struct Host {
    args: Vec<String>,
    config: HostConfig,
    environment: HostEnvironment,
    root_components: Vec<RootComponent>,
    services: ServiceRegistry,
    state: HostState,
}

impl Host {
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn environment(&self) -> &HostEnvironment {
        &self.environment
    }

    pub fn root_components(&self) -> &[RootComponent] {
        &self.root_components
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Resolve each registered component against the hosting page. An
    /// unmatched selector only means that component renders nothing.
    pub fn resolve_mounts(&self) -> Vec<MountOutcome> {
        let page = self.config.frontend_dist.join("index.html");
        let markup = match std::fs::read_to_string(&page) {
            Ok(markup) => Some(markup),
            Err(err) => {
                warn!(
                    "hosting page {} is not readable ({}); root components will not render",
                    page.display(),
                    err
                );
                None
            }
        };

        self.root_components
            .iter()
            .map(|component| MountOutcome {
                component: component.name.clone(),
                selector: component.selector.clone(),
                mounted: markup
                    .as_deref()
                    .is_some_and(|markup| selector_matches(markup, &component.selector)),
            })
            .collect()
    }

    /// Drive the host until the hosting environment signals unload.
    pub async fn run(self) -> Result<()> {
        self.run_until(unload_signal()).await
    }

    /// Run loop with an explicit unload future. Consuming `self` means a
    /// terminated host cannot be restarted.
    pub async fn run_until(mut self, unload: impl Future<Output = ()>) -> Result<()> {
        self.state = HostState::Running;
        debug!("host arguments: {:?}", self.args);

        for outcome in self.resolve_mounts() {
            if outcome.mounted {
                info!("mounted {} at '{}'", outcome.component, outcome.selector);
            } else {
                warn!(
                    "no element matches '{}'; {} will not render",
                    outcome.selector, outcome.component
                );
            }
        }

        info!("host running until unload");
        unload.await;

        self.state = HostState::Terminated;
        info!("host terminated");
        Ok(())
    }
}

// Stand-in for the hosting page's unload: Ctrl-C everywhere, SIGTERM
// where the platform has it.
async fn unload_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(err) = result {
                            warn!("interrupt handler failed: {}", err);
                        }
                    }
                    _ = terminate.recv() => {}
                }
            }
            Err(err) => {
                warn!("terminate handler unavailable: {}", err);
                if let Err(err) = tokio::signal::ctrl_c().await {
                    warn!("interrupt handler failed: {}", err);
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("interrupt handler failed: {}", err);
        }
    }
}
