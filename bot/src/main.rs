mod render;
mod scheduler;

use anyhow::Result;
use scheduler::Scheduler;
use std::env;
use steam::{Config, Tracker};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    common::setup_env();

    let tracker = Tracker::new(Config::from_env()?);

    match env::var("TRACKER_SCHEDULE") {
        Ok(schedule) => run_scheduled(tracker, &schedule).await,
        Err(_) => run_once(&tracker).await,
    }
}

async fn run_once(tracker: &Tracker) -> Result<()> {
    let report = tracker.run().await?;
    println!("{}", render::report(&report));
    Ok(())
}

async fn run_scheduled(tracker: Tracker, schedule: &str) -> Result<()> {
    let scheduler = Scheduler::new(tracker).await?;
    scheduler.schedule_runs(schedule).await?;
    scheduler.start().await?;
    signal::ctrl_c().await?;
    scheduler.shutdown().await?;
    Ok(())
}
