//! Single-threaded virtual-clock task queue.
//!
//! Every timer in the engine (slider tick, banner dismissal, submission
//! latency) is a task on one [`Scheduler`]. Time only moves when the owner
//! drains due tasks with [`Scheduler::pop_due`] and then calls
//! [`Scheduler::settle`], which makes replays fully deterministic.
//!
//! Tasks due at the same instant run in the order they were first scheduled.
//! Cancelled tasks are dropped lazily when they reach the front of the queue.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Cancel handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Entry<T> {
    task: T,
    every: Option<u64>,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    live: HashMap<u64, Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of live (not cancelled, not yet finished) tasks.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Run `task` once, `delay` ms from now.
    pub fn schedule_after(&mut self, delay: u64, task: T) -> TaskHandle {
        self.insert(delay, task, None)
    }

    /// Run `task` every `interval` ms, first after one interval.
    pub fn schedule_every(&mut self, interval: u64, task: T) -> TaskHandle {
        let interval = interval.max(1);
        self.insert(interval, task, Some(interval))
    }

    fn insert(&mut self, delay: u64, task: T, every: Option<u64>) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((self.now.saturating_add(delay), seq)));
        self.live.insert(seq, Entry { task, every });
        TaskHandle(seq)
    }

    /// Cancel a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.live.remove(&handle.0).is_some()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.live.contains_key(&handle.0)
    }

    /// Due time of the earliest live task.
    pub fn next_due(&mut self) -> Option<u64> {
        self.drop_cancelled_front();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Periodic tasks are re-queued one interval later.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskHandle, T)> {
        self.drop_cancelled_front();
        let &Reverse((due, seq)) = self.queue.peek()?;
        if due > until {
            return None;
        }
        self.queue.pop();
        self.now = self.now.max(due);

        let every = self.live.get(&seq)?.every;
        let task = match every {
            Some(interval) => {
                self.queue.push(Reverse((due.saturating_add(interval), seq)));
                self.live.get(&seq)?.task.clone()
            }
            None => self.live.remove(&seq)?.task,
        };
        Some((TaskHandle(seq), task))
    }

    /// Collapse the firings of periodic task `handle` due up to `until` into
    /// one, as long as no other task falls due in between.
    ///
    /// Only applies when `handle` is the earliest task. All firings but the
    /// last are skipped and their count returned; the last one stays queued
    /// for [`Scheduler::pop_due`].
    pub fn skip_periodic(&mut self, handle: TaskHandle, until: u64) -> u64 {
        self.drop_cancelled_front();
        let Some(&Reverse((due, seq))) = self.queue.peek() else {
            return 0;
        };
        let Some(interval) = self.live.get(&seq).and_then(|e| e.every) else {
            return 0;
        };
        if seq != handle.0 || due > until {
            return 0;
        }

        let other_due = self
            .queue
            .iter()
            .filter(|Reverse((_, s))| *s != seq && self.live.contains_key(s))
            .map(|Reverse((d, _))| *d)
            .min();
        let horizon = match other_due {
            Some(d) if d <= due => return 0,
            Some(d) => until.min(d - 1),
            None => until,
        };

        let skipped = (horizon - due) / interval;
        if skipped > 0 {
            self.queue.pop();
            self.queue
                .push(Reverse((due + skipped * interval, seq)));
            self.now = self.now.max(due + (skipped - 1) * interval);
        }
        skipped
    }

    /// Move the clock forward to `until` once due tasks have been drained.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.live.clear();
        self.queue.clear();
    }

    fn drop_cancelled_front(&mut self) {
        while let Some(Reverse((_, seq))) = self.queue.peek() {
            if self.live.contains_key(seq) {
                break;
            }
            self.queue.pop();
        }
    }
}
