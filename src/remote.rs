use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;
use crate::task::{Status, Task};

pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/todos";
pub const DEFAULT_LIMIT: usize = 20;

const TIMEOUT_SECS: u64 = 10;

/// Record shape of the remote todo feed.
#[derive(Debug, Deserialize)]
pub struct RemoteRecord {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl From<RemoteRecord> for Task {
    fn from(record: RemoteRecord) -> Self {
        Task {
            // The feed carries no description, so one is synthesized.
            description: format!("Task {} description", record.id),
            status: if record.completed {
                Status::Done
            } else {
                Status::ToDo
            },
            id: record.id,
            title: record.title,
        }
    }
}

/// Fetch the remote feed and map the first `limit` records to tasks.
pub fn fetch_tasks(url: &str, limit: usize) -> Result<Vec<Task>> {
    let records: Vec<RemoteRecord> = ureq::get(url)
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .call()?
        .into_json()?;
    Ok(map_records(records, limit))
}

pub fn map_records(records: Vec<RemoteRecord>, limit: usize) -> Vec<Task> {
    records.into_iter().take(limit).map(Task::from).collect()
}

/// Run the fetch on a background thread so the event loop keeps serving
/// key events while the request is in flight. The result lands on `tx`;
/// a dropped receiver just means the app quit before the load finished.
pub fn spawn_fetch(url: String, limit: usize, tx: Sender<Result<Vec<Task>>>) {
    thread::spawn(move || {
        let _ = tx.send(fetch_tasks(&url, limit));
    });
}
