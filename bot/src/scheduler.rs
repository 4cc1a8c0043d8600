use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use steam::Tracker;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::render;

pub(crate) struct Scheduler {
    tracker: Arc<Mutex<Tracker>>,
    scheduler: JobScheduler,
}

impl Scheduler {
    pub(crate) async fn new(tracker: Tracker) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Scheduler {
            tracker: Arc::new(Mutex::new(tracker)),
            scheduler,
        })
    }

    /// Runs the tracker on `schedule`, either cron syntax or english such as "every day".
    /// A tick that fires while a run is still going waits for it to finish.
    pub(crate) async fn schedule_runs(&self, schedule: &str) -> Result<()> {
        let tracker = self.tracker.clone();

        self.scheduler
            .add(Job::new_async(schedule, move |_uuid, _l| {
                let tracker = tracker.clone();
                Box::pin(async move {
                    let tracker = tracker.lock().await;
                    match tracker.run().await {
                        Ok(report) => println!("{}", render::report(&report)),
                        Err(e) => error!("Tracking run failed: {e}"),
                    }
                })
            })?)
            .await?;

        info!("Scheduled tracking runs: {schedule}");
        Ok(())
    }

    pub(crate) async fn start(&self) -> Result<()> {
        Ok(self.scheduler.start().await?)
    }

    pub(crate) async fn shutdown(mut self) -> Result<()> {
        Ok(self.scheduler.shutdown().await?)
    }
}
