use std::future::Future;
use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{Result, SweepError};

/// Default number of module roots processed at the same time.
pub const DEFAULT_JOBS: usize = 10;

/// A bounded group of independent per-module operations.
///
/// Every operation is spawned immediately but only `limit` of them hold a
/// slot at once. Waiting drains the whole group: a failure never cancels its
/// siblings.
#[derive(Debug)]
pub struct TaskGroup<T> {
    slots: Arc<Semaphore>,
    tasks: JoinSet<Result<T>>,
    progress: Option<ProgressBar>,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(limit.max(1))),
            tasks: JoinSet::new(),
            progress: None,
        }
    }

    /// Tick `progress` once per finished operation.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn spawn<F>(&mut self, op: F)
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let slots = Arc::clone(&self.slots);
        self.tasks.spawn(async move {
            let _permit = slots.acquire_owned().await.expect("semaphore is never closed");
            op.await
        });
        if let Some(pb) = &self.progress {
            pb.inc_length(1);
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every operation and return the results in completion order.
    ///
    /// A panicking operation is re-raised only after all others finished.
    pub async fn wait_all(mut self) -> Vec<Result<T>> {
        let mut results = Vec::with_capacity(self.tasks.len());
        let mut panic = None;

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) if e.is_panic() => {
                    panic.get_or_insert(e.into_panic());
                }
                Err(e) => log::error!("task did not complete: {e}"),
            }
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
        if let Some(payload) = panic {
            std::panic::resume_unwind(payload);
        }
        results
    }

    /// Wait for every operation and yield the first recorded failure, if any.
    pub async fn wait(self) -> Result<Vec<T>> {
        first_error(self.wait_all().await)
    }
}

/// Split results into successes, or the earliest failure. Later failures are
/// logged only.
pub fn first_error<T>(results: Vec<Result<T>>) -> Result<Vec<T>> {
    let mut values = Vec::with_capacity(results.len());
    let mut first: Option<SweepError> = None;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) if first.is_none() => first = Some(e),
            Err(e) => match std::error::Error::source(&e) {
                Some(cause) => log::error!("{e}: {cause}"),
                None => log::error!("{e}"),
            },
        }
    }

    match first {
        Some(e) => Err(e),
        None => Ok(values),
    }
}
