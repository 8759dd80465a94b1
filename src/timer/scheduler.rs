//! Host scheduler seam for repeating callbacks

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

/// Opaque handle for one repeating registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntervalId(u64);

impl IntervalId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interval#{}", self.0)
    }
}

/// Callback invoked on each period, given the id of the registration that fired
pub type IntervalCallback = Arc<dyn Fn(IntervalId) + Send + Sync>;

/// Periodic-invocation API of the host.
pub trait Scheduler: Send + Sync {
    /// Invoke `callback` every `period`, first one period from now.
    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> IntervalId;

    /// Stop future invocations of `id`. Unknown ids are ignored.
    fn clear_interval(&self, id: IntervalId);
}

/// Scheduler whose periods elapse only when the host calls [`ManualScheduler::fire`].
#[derive(Default)]
pub struct ManualScheduler {
    next_id: AtomicU64,
    active: Mutex<BTreeMap<IntervalId, (Duration, IntervalCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations
    pub fn active_count(&self) -> usize {
        self.active.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Period of a live registration
    pub fn period_of(&self, id: IntervalId) -> Option<Duration> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|(period, _)| *period)
    }

    /// Elapse one period: invoke every live registration once.
    ///
    /// Returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        let due: Vec<(IntervalId, IntervalCallback)> = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, (_, callback))| (*id, Arc::clone(callback)))
            .collect();

        // Callbacks may register or clear intervals, so none run under the lock
        for (id, callback) in &due {
            callback(*id);
        }
        due.len()
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&self, period: Duration, callback: IntervalCallback) -> IntervalId {
        let id = IntervalId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, (period, callback));
        id
    }

    fn clear_interval(&self, id: IntervalId) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_runs_each_live_registration_once() {
        let scheduler = ManualScheduler::new();
        let hits = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&hits);
        let id = scheduler.set_interval(
            Duration::from_secs(1),
            Arc::new(move |_: IntervalId| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(scheduler.active_count(), 1);
        assert_eq!(scheduler.period_of(id), Some(Duration::from_secs(1)));
        assert_eq!(scheduler.fire(), 1);
        assert_eq!(scheduler.fire(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        scheduler.clear_interval(id);
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.fire(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clearing_an_unknown_id_is_ignored() {
        let scheduler = ManualScheduler::new();
        scheduler.clear_interval(IntervalId::new(42));
        assert_eq!(scheduler.active_count(), 0);
    }
}
