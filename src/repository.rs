use tracing::info;

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{Task, TaskStatus};

/// Task operations over the stored list. Each mutation reads the whole
/// list, changes it in memory and writes the whole list back.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    storage: Storage,
}

impl TaskRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, description: impl Into<String>) -> Result<Task> {
        let mut tasks = self.storage.read_all()?;
        let task = Task::new(next_id(&tasks)?, description);
        tasks.push(task.clone());
        self.storage.write_all(&tasks)?;
        info!(id = task.id, "added task");
        Ok(task)
    }

    pub fn update_description(&self, id: u32, description: &str) -> Result<Task> {
        let task = self.update_with(id, |task| task.set_description(description))?;
        info!(task_id = id, "updated task description");
        Ok(task)
    }

    /// Validates `status` before touching the store.
    pub fn update_status(&self, id: u32, status: &str) -> Result<Task> {
        let status: TaskStatus = status.parse()?;
        let task = self.update_with(id, |task| task.set_status(status))?;
        info!(task_id = id, %status, "updated task status");
        Ok(task)
    }

    pub fn delete(&self, id: u32) -> Result<Task> {
        let mut tasks = self.storage.read_all()?;
        let index = position(&tasks, id)?;
        let removed = tasks.remove(index);
        self.storage.write_all(&tasks)?;
        info!(task_id = id, "deleted task");
        Ok(removed)
    }

    /// All tasks when `filter` is `None`, otherwise those with that status,
    /// in stored order.
    pub fn list_by_status(&self, filter: Option<TaskStatus>) -> Result<Vec<Task>> {
        let tasks = self.storage.read_all()?;
        Ok(match filter {
            None => tasks,
            Some(status) => tasks.into_iter().filter(|t| t.status == status).collect(),
        })
    }

    fn update_with(&self, id: u32, update: impl FnOnce(&mut Task)) -> Result<Task> {
        let mut tasks = self.storage.read_all()?;
        let index = position(&tasks, id)?;
        update(&mut tasks[index]);
        let task = tasks[index].clone();
        self.storage.write_all(&tasks)?;
        Ok(task)
    }
}

// One past the highest live id, so ids freed by a delete in the middle of
// the list are never handed out twice.
fn next_id(tasks: &[Task]) -> Result<u32> {
    tasks
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(Error::IdExhausted)
}

fn position(tasks: &[Task], id: u32) -> Result<usize> {
    tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(Error::NotFound(id))
}
