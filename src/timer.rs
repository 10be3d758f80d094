//! Wall-clock timing for the command-line tool.

use std::time::Instant;

/// Tracks per-task and cumulative elapsed time, reporting both in
/// milliseconds on stdout after each task.
pub struct TaskTimer {
    start: Instant,
    task_start: Instant,
}

impl TaskTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            task_start: now,
        }
    }

    pub fn start_task(&mut self) {
        self.task_start = Instant::now();
    }

    pub fn end_task(&self) {
        let now = Instant::now();
        println!("task: {}ms", (now - self.task_start).as_millis());
        println!("total: {}ms", (now - self.start).as_millis());
    }
}

impl Default for TaskTimer {
    fn default() -> Self {
        Self::new()
    }
}
