use anyhow::Result;
use steam::{Config, Tracker};

#[tokio::main]
async fn main() -> Result<()> {
    common::setup_env();
    track_once().await?;
    Ok(())
}

async fn track_once() -> Result<()> {
    let tracker = Tracker::new(Config::from_env()?);
    let report = tracker.run().await?;
    log::info!("Tracked {} items, snapshot saved", report.items.len());
    Ok(())
}
