use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// A one-shot deferred action running on the tokio runtime.
///
/// The callback fires once after `delay`. Cancelling (or dropping) the handle
/// before then aborts the task, so the callback never runs.
#[derive(Debug)]
pub struct EmergencyTimer {
    handle: Option<JoinHandle<()>>,
}

impl EmergencyTimer {
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            on_expire();
        });
        log::debug!("[EmergencyTimer] scheduled to fire in {:?}", delay);
        Self {
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                log::debug!("[EmergencyTimer] cancelled before firing");
            }
            handle.abort();
        }
    }

    /// True once the callback has run or the timer was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for EmergencyTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
