use anyhow::Result;
use vstswap::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
