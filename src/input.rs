//! Decoding task sets from comma-separated text.
//!
//! Each record describes one task as `name, phase, period, wcet, deadline`.
//! There is no header row. Decoding stops at the first record that is not
//! of this form, or once the configured maximum number of tasks is read.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::InvalidTaskSet;
use crate::task::{Task, TaskSet};

/// The maximum number of tasks read when no other limit is configured.
pub const DEFAULT_MAX_TASKS: usize = 100;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read task file: {0}")]
    Io(#[from] io::Error),
    #[error("cannot decode task records: {0}")]
    Csv(#[from] csv::Error),
    #[error("no well-formed task record found")]
    NoTasks,
    #[error("invalid task set: {0}")]
    InvalidTaskSet(#[from] InvalidTaskSet),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Records beyond this count are ignored.
    pub max_tasks: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }
}

/// Read a task set from the file at `path`.
pub fn read_task_set(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<TaskSet, InputError> {
    let file = File::open(path.as_ref())?;
    parse_task_set(file, options)
}

/// Read a task set from any reader.
pub fn parse_task_set<R: Read>(reader: R, options: &ReaderOptions) -> Result<TaskSet, InputError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for result in rdr.records() {
        if tasks.len() >= options.max_tasks {
            debug!(max_tasks = options.max_tasks, "task limit reached");
            break;
        }
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "stopping at undecodable record");
                break;
            }
        };
        match decode_task(&record) {
            Some(task) => tasks.push(task),
            None => {
                warn!(line = tasks.len() + 1, "stopping at malformed task record");
                break;
            }
        }
    }

    if tasks.is_empty() {
        return Err(InputError::NoTasks);
    }
    debug!(tasks = tasks.len(), "task set read");
    Ok(TaskSet::new(tasks)?)
}

fn decode_task(record: &StringRecord) -> Option<Task> {
    if record.len() != 5 {
        return None;
    }
    let name = &record[0];
    if name.is_empty() {
        return None;
    }
    let field = |i: usize| record[i].parse().ok();
    Some(Task::new(name, field(1)?, field(2)?, field(3)?, field(4)?))
}
