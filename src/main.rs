//! wavebar entry point.

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    wavebar::app::run().await
}
