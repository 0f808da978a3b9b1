// AlbumRanking client host bootstrap.

pub mod components;
pub mod config;
pub mod environment;
pub mod host;
pub mod http_client;
pub mod logging;
pub mod services;

pub use host::{Host, HostBuilder};
pub use http_client::HttpClient;

use anyhow::Result;

use crate::components::{APP_SELECTOR, HEAD_OUTLET_SELECTOR};

/// Application entry: compose the host and drive it until unload.
pub async fn run(args: Vec<String>) -> Result<()> {
    logging::init()?;

    let host = HostBuilder::create_default(args)
        .root_component("App", APP_SELECTOR)
        .root_component("HeadOutlet", HEAD_OUTLET_SELECTOR)
        .scoped_http_client()
        .build()?;

    host.run().await
}
