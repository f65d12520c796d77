//! Single-threaded timer scheduler.
//!
//! Timers carry a caller-supplied task value instead of a callback, so
//! firing a timer never borrows the owner; the owner polls for due tasks
//! and acts on them. Every timer is cancellable through its `TimerId`,
//! which is what makes immediate teardown possible: a cancelled timer can
//! never deliver a stale task.

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Entry<T> {
    id: TimerId,
    due_ms: u64,
    /// `Some` for repeating timers.
    period_ms: Option<u64>,
    task: T,
}

/// A queue of one-shot and repeating timers keyed to a millisecond clock.
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    fn alloc_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Schedule `task` to fire once, `delay_ms` after `now_ms`.
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TimerId {
        let id = self.alloc_id();
        self.entries.push(Entry {
            id,
            due_ms: now_ms + delay_ms,
            period_ms: None,
            task,
        });
        id
    }

    /// Schedule `task` to fire every `period_ms`, first at `now_ms + period_ms`.
    pub fn schedule_repeating(&mut self, now_ms: u64, period_ms: u64, task: T) -> TimerId {
        let id = self.alloc_id();
        self.entries.push(Entry {
            id,
            due_ms: now_ms + period_ms,
            period_ms: Some(period_ms),
            task,
        });
        id
    }

    /// Cancel a timer. Cancelling an already-fired or unknown id is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is still pending.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending due time, if any.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Fire every timer due at or before `now_ms`, in due-time order.
    ///
    /// One-shot timers are removed; repeating timers are rescheduled one
    /// period past their previous due time. A repeating timer fires at most
    /// once per poll, so a stalled caller does not get a burst of backlog.
    pub fn poll(&mut self, now_ms: u64) -> Vec<T> {
        let mut due: Vec<(u64, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .map(|(i, e)| (e.due_ms, i))
            .collect();
        due.sort_by_key(|&(due_ms, _)| due_ms);

        let mut fired = Vec::with_capacity(due.len());
        let mut remove: Vec<TimerId> = Vec::new();
        for &(_, i) in &due {
            let entry = &mut self.entries[i];
            fired.push(entry.task.clone());
            match entry.period_ms {
                Some(period) => {
                    let mut next = entry.due_ms + period;
                    // Skip missed periods rather than replaying them.
                    if next <= now_ms {
                        next = now_ms + period;
                    }
                    entry.due_ms = next;
                },
                None => remove.push(entry.id),
            }
        }
        self.entries.retain(|e| !remove.contains(&e.id));
        fired
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
