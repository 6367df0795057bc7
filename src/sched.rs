//! A fair-share scheduling simulator.
//!
//! Runnable tasks wait on a timeline, an [`LlrbMultimap`] keyed by virtual
//! runtime.  Each tick the running task is charged one unit of virtual
//! runtime.  Once it has run ahead of the least-charged waiting task it goes
//! back on the timeline, and the task at the timeline's minimum runs next.
//! Tasks that tie on virtual runtime run in the order they were queued.
//!
//! ```
//! use llrb_collections::sched::{parse_tasks, Scheduler};
//!
//! let tasks = parse_tasks("A 0 2\nB 0 2\n");
//! let lines: Vec<String> = Scheduler::new(tasks).map(|t| t.to_string()).collect();
//! assert_eq!(lines, ["0 [2]: A", "1 [2]: B", "2 [2]: B*", "3 [1]: A*"]);
//! ```

use std::fmt::{Display, Formatter};

use tracing::{debug, trace, warn};

use crate::LlrbMultimap;

/// Index of a task inside its [`Scheduler`].
pub type TaskHandle = usize;

/// One task as described by the input: an identifier, the tick at which it
/// becomes runnable, and how many ticks of work it needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskSpec {
    pub id: char,
    pub start: u32,
    pub duration: u32,
}

/// Parses whitespace-separated `identifier start duration` triples.
///
/// Parsing stops at the first triple that is incomplete or malformed (an
/// identifier longer than one character, or a number that does not parse);
/// everything read up to that point is kept.  The tasks come back sorted by
/// identifier.
pub fn parse_tasks(input: &str) -> Vec<TaskSpec> {
    let mut tokens = input.split_whitespace();
    let mut specs = Vec::new();

    while let Some(id) = tokens.next() {
        match parse_triple(id, tokens.next(), tokens.next()) {
            Some(spec) => specs.push(spec),
            None => {
                warn!(entry = specs.len(), "stopping at malformed task entry");
                break;
            }
        }
    }

    specs.sort_by_key(|t| t.id);
    specs
}

fn parse_triple(id: &str, start: Option<&str>, duration: Option<&str>) -> Option<TaskSpec> {
    let mut chars = id.chars();
    let id = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return None,
    };

    Some(TaskSpec {
        id,
        start: start?.parse().ok()?,
        duration: duration?.parse().ok()?,
    })
}

struct Task {
    spec: TaskSpec,
    remaining: u32,
    vruntime: u32,
    done: bool,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// The global tick counter.
    pub tick: u32,
    /// Tasks launched and not yet complete, counted before this tick's
    /// completion (if any).
    pub active: usize,
    /// The task that ran, if any.
    pub running: Option<char>,
    /// Whether the running task finished during this tick.
    pub completed: bool,
}

impl Display for Tick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: ", self.tick, self.active)?;
        match self.running {
            None => f.write_str("_"),
            Some(id) if self.completed => write!(f, "{}*", id),
            Some(id) => write!(f, "{}", id),
        }
    }
}

/// Drives a set of tasks to completion one tick at a time.
pub struct Scheduler {
    tasks: Vec<Task>,
    timeline: LlrbMultimap<u32, TaskHandle>,
    current: Option<TaskHandle>,
    min_vruntime: u32,
    tick: u32,
    active: usize,
    pending: usize,
}

impl Scheduler {
    pub fn new(specs: Vec<TaskSpec>) -> Self {
        let tasks: Vec<Task> = specs
            .into_iter()
            .map(|spec| Task {
                spec,
                remaining: spec.duration,
                vruntime: 0,
                done: false,
            })
            .collect();

        Scheduler {
            pending: tasks.len(),
            tasks,
            timeline: LlrbMultimap::new(),
            current: None,
            min_vruntime: 0,
            tick: 0,
            active: 0,
        }
    }

    /// The tick that the next call to [`tick`](#method.tick) simulates.
    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    /// Returns true once every task has completed.
    pub fn is_finished(&self) -> bool {
        self.pending == 0
    }

    /// Simulates one tick, or returns `None` if every task has completed.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.is_finished() {
            return None;
        }

        self.launch();
        self.preempt();
        self.select();
        self.execute();
        Some(self.report())
    }

    // queue every task whose start time is now, charged as much as the
    // least-charged waiting task
    fn launch(&mut self) {
        for (handle, task) in self.tasks.iter_mut().enumerate() {
            if task.done || task.spec.start != self.tick {
                continue;
            }

            task.vruntime = self.min_vruntime;
            self.timeline.insert(task.vruntime, handle);
            self.active += 1;
            debug!(tick = self.tick, task = %task.spec.id, vruntime = task.vruntime, "launched");
        }
    }

    fn preempt(&mut self) {
        let Some(handle) = self.current else {
            return;
        };

        let vruntime = self.tasks[handle].vruntime;
        if vruntime > self.min_vruntime {
            self.timeline.insert(vruntime, handle);
            self.current = None;
            debug!(tick = self.tick, task = %self.tasks[handle].spec.id, vruntime, "preempted");
        }
    }

    fn select(&mut self) {
        if self.current.is_some() {
            return;
        }

        let Ok(&vruntime) = self.timeline.min() else {
            return;
        };
        let Ok(&handle) = self.timeline.get(&vruntime) else {
            return;
        };
        self.timeline.remove(&vruntime);

        self.current = Some(handle);
        self.min_vruntime = self.timeline.min().copied().unwrap_or(0);
        debug!(
            tick = self.tick,
            task = %self.tasks[handle].spec.id,
            min_vruntime = self.min_vruntime,
            "selected"
        );
    }

    fn execute(&mut self) {
        if let Some(handle) = self.current {
            let task = &mut self.tasks[handle];
            task.remaining = task.remaining.saturating_sub(1);
            task.vruntime += 1;
        }
    }

    fn report(&mut self) -> Tick {
        let mut tick = Tick {
            tick: self.tick,
            active: self.active,
            running: None,
            completed: false,
        };

        if let Some(handle) = self.current {
            let task = &mut self.tasks[handle];
            tick.running = Some(task.spec.id);

            if task.remaining == 0 {
                task.done = true;
                tick.completed = true;
                self.current = None;
                self.active -= 1;
                self.pending -= 1;
                debug!(tick = self.tick, task = %task.spec.id, "completed");
            }
        }

        trace!(%tick, waiting = self.timeline.value_count());
        self.tick += 1;
        tick
    }
}

impl Iterator for Scheduler {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.tick()
    }
}
