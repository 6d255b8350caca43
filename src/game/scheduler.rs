use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    pub generation: u64,
    pub action: T,
}

#[derive(Clone, Debug)]
struct Task<T> {
    id: TaskId,
    due_ms: u64,
    interval_ms: Option<u64>,
    generation: u64,
    action: T,
}

/// Timeouts on an explicit clock. Nothing fires until the owner advances
/// time, and every task carries the generation it was scheduled under so
/// the owner can drop stale ones.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now_ms: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

fn to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, delay_ms: u64, interval_ms: Option<u64>, generation: u64, action: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms,
            generation,
            action,
        });
        id
    }

    pub fn timeout_once(&mut self, delay: Duration, generation: u64, action: T) -> TaskId {
        self.push(to_ms(delay), None, generation, action)
    }

    pub fn timeout_repeating(&mut self, interval: Duration, generation: u64, action: T) -> TaskId {
        let interval_ms = to_ms(interval).max(1);
        self.push(interval_ms, Some(interval_ms), generation, action)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Time until the next due one-shot task, ignoring repeating ones.
    pub fn next_timeout_in(&self) -> Option<Duration> {
        self.tasks
            .iter()
            .filter(|task| task.interval_ms.is_none())
            .map(|task| task.due_ms.saturating_sub(self.now_ms))
            .min()
            .map(Duration::from_millis)
    }

    /// Removes the earliest task due at or before `until_ms` and moves the
    /// clock to its due time. Ties go to the task scheduled first. Repeating
    /// tasks are put back one interval later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired<T>> {
        let (pos, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_ms <= until_ms)
            .min_by_key(|(_, task)| (task.due_ms, task.id.0))?;

        let due_ms = self.tasks[pos].due_ms;
        self.now_ms = self.now_ms.max(due_ms);

        let fired = match self.tasks[pos].interval_ms {
            Some(interval_ms) => {
                let task = &mut self.tasks[pos];
                task.due_ms = task.due_ms.saturating_add(interval_ms);
                Fired {
                    generation: task.generation,
                    action: task.action.clone(),
                }
            }
            None => {
                let task = self.tasks.remove(pos);
                Fired {
                    generation: task.generation,
                    action: task.action,
                }
            }
        };
        Some(fired)
    }

    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    pub fn deadline(&self, elapsed: Duration) -> u64 {
        self.now_ms.saturating_add(to_ms(elapsed))
    }
}
