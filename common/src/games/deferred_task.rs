use std::time::Duration;

use tokio::task::JoinHandle;

/// A single delayed job that can be called off before it fires.
///
/// Scheduling again replaces whatever was pending, and dropping the task
/// aborts it.
#[derive(Default)]
pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Returns whether something was still waiting to run.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    const DELAY: Duration = Duration::from_millis(500);

    fn counting_task(counter: Arc<AtomicU32>) -> impl Future<Output = ()> + Send + 'static {
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut task = DeferredTask::new();
        task.schedule(DELAY, counting_task(Arc::clone(&counter)));
        assert!(task.is_pending());

        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(DELAY).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!task.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut task = DeferredTask::new();
        task.schedule(DELAY, counting_task(Arc::clone(&counter)));

        tokio::time::sleep(DELAY / 2).await;
        assert!(task.cancel());
        assert!(!task.cancel());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_pending() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut task = DeferredTask::new();
        task.schedule(DELAY, counting_task(Arc::clone(&counter)));
        task.schedule(DELAY, counting_task(Arc::clone(&counter)));

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts() {
        let counter = Arc::new(AtomicU32::new(0));
        {
            let mut task = DeferredTask::new();
            task.schedule(DELAY, counting_task(Arc::clone(&counter)));
        }
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
