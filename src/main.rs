use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Local overrides (base address, log filter) may live in a .env.
    let _ = dotenv::dotenv();

    albumranking::run(std::env::args().skip(1).collect()).await
}
