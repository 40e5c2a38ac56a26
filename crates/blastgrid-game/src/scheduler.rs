use std::time::Duration;

/// A queue of delayed tasks driven by an external clock.
///
/// Nothing happens on its own: the owner calls [`Scheduler::advance`] with
/// the time that has passed and receives the tasks that became due. This
/// keeps the game deterministic and lets tests step time explicitly.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use blastgrid_game::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(Duration::from_millis(150), "settle");
///
/// assert!(scheduler.advance(Duration::from_millis(100)).is_empty());
/// assert_eq!(scheduler.advance(Duration::from_millis(50)), vec!["settle"]);
/// assert!(scheduler.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated by [`Scheduler::advance`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no task is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Queues `task` to become due after `delay`.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending { due, seq, task });
    }

    /// Moves time forward by `dt` and returns every task that became due.
    ///
    /// Tasks are returned in due-time order; tasks due at the same time keep
    /// the order they were scheduled in. Tasks with a zero delay are due on
    /// the next call, even if `dt` is zero.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = pending;
        due.sort_by_key(|p| (p.due, p.seq));
        due.into_iter().map(|p| p.task).collect()
    }

    /// Drops every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}
