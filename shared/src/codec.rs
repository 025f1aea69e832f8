//! Translation between the domain model and the persisted slot format.
//!
//! The slot holds a JSON array of `{"id", "task", "finished"}` objects.
//! Those field names exist only here.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTask {
    pub id: TaskId,
    pub task: String,
    pub finished: bool,
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            task: task.text.clone(),
            finished: task.done,
        }
    }
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        Self {
            id: stored.id,
            text: stored.task,
            done: stored.finished,
        }
    }
}

pub fn encode(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredTask> = tasks.iter().map(StoredTask::from).collect();
    serde_json::to_string(&records)
}

pub fn decode(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    let records: Vec<StoredTask> = serde_json::from_str(raw)?;
    Ok(records.into_iter().map(Task::from).collect())
}
