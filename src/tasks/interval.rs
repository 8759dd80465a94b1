//! Repeating interval tasks on the tokio runtime

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::timer::{IntervalCallback, IntervalId, Scheduler};

/// Scheduler backed by one spawned tokio task per registration
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<IntervalId, JoinHandle<()>>>,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto `runtime`
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a scheduler on the runtime of the calling task.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Number of registrations that have not been cleared
    pub fn active_count(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|_, task| !task.is_finished());
        tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> IntervalId {
        let id = IntervalId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        let task = self.runtime.spawn(async move {
            // First invocation one period after registration
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                callback(id);
            }
        });

        let previous = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, task);
        if let Some(previous) = previous {
            warn!("Replacing live task for {}", id);
            previous.abort();
        }

        debug!("Spawned interval task for {} every {:?}", id, period);
        id
    }

    fn clear_interval(&self, id: IntervalId) {
        let task = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);

        match task {
            Some(task) => {
                task.abort();
                debug!("Aborted interval task for {}", id);
            }
            None => debug!("No interval task for {}", id),
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, task) in tasks.drain() {
            task.abort();
        }
    }
}
