//! Cron scheduler for background maintenance of the registration table.
//!
//! Currently runs a single job: the expiry sweep that reaps gateway-tier
//! registrations whose payment window lapsed, freeing their seats for
//! resale. Jobs receive their own database and notifier handles so a slow
//! run never blocks a request.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, service::notify::Notifier};

pub mod expiry;

/// Job scheduler for recurring registration maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    notifier: Notifier,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, notifier: Notifier) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            db,
            notifier,
            sched,
        })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// Once started, jobs run automatically according to their cron
    /// expressions until the scheduler is dropped.
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            expiry::CRON_EXPRESSION,
            "registration expiry",
            expiry::sweep_expired_registrations,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The function receives clones of the database connection and notifier
    /// and reports how many rows it touched; the count lands in the debug
    /// log, failures in the error log.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async function executing one run of the job
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, Notifier) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let notifier = self.notifier.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let notifier = notifier.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db, notifier).await {
                        Ok(count) => tracing::debug!("{} run touched {} row(s)", name, count),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
