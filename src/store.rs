use crate::error::{Result, TasktabError};
use crate::task::{Status, Task};

/// Owner of the authoritative task list and its derived filtered view.
///
/// Every mutation goes through this store; `filtered` is recomputed from the
/// authoritative list plus the current search term and status filter, and is
/// never edited on its own. Ids come from a counter that only moves forward,
/// so an add after a delete can never reuse an id.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filtered: Vec<Task>,
    search_term: String,
    status_filter: Option<Status>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            status_filter: None,
            next_id: 1,
        }
    }

    /// The full, unfiltered task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The projection shown to the user after search/status predicates.
    pub fn filtered(&self) -> &[Task] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> Option<Status> {
        self.status_filter
    }

    /// Replace the whole list (initial load). Reseeds the id counter past
    /// the highest loaded id so client-created tasks never collide.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.tasks = tasks;
        self.apply_filters();
    }

    /// Add a new task. Title and description must be non-blank; on success
    /// the assigned id is returned.
    pub fn add(&mut self, title: &str, description: &str, status: Status) -> Result<u64> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(TasktabError::invalid_task("title must not be empty"));
        }
        if description.is_empty() {
            return Err(TasktabError::invalid_task("description must not be empty"));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status,
        });
        self.apply_filters();
        Ok(id)
    }

    /// Remove the task with the given id. Silent no-op if absent.
    pub fn remove(&mut self, id: u64) {
        self.tasks.retain(|t| t.id != id);
        self.apply_filters();
    }

    /// Replace the task whose id matches `task.id` with the given record.
    /// Silent no-op if absent.
    pub fn update(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
        self.apply_filters();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.apply_filters();
    }

    pub fn set_status_filter(&mut self, filter: Option<Status>) {
        self.status_filter = filter;
        self.apply_filters();
    }

    fn apply_filters(&mut self) {
        let term = self.search_term.to_lowercase();
        let filter = self.status_filter;
        self.filtered = self
            .tasks
            .iter()
            .filter(|t| filter.map_or(true, |s| t.status == s))
            .filter(|t| {
                term.is_empty()
                    || t.title.to_lowercase().contains(&term)
                    || t.description.to_lowercase().contains(&term)
            })
            .cloned()
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> TaskStore {
        let mut store = TaskStore::new();
        store
            .add("Buy milk", "from the corner shop", Status::ToDo)
            .unwrap();
        store
            .add("Write report", "quarterly numbers", Status::InProgress)
            .unwrap();
        store
            .add("Ship release", "tag and publish", Status::Done)
            .unwrap();
        store
    }

    #[test]
    fn empty_predicates_show_everything() {
        let store = seeded();
        assert_eq!(store.filtered(), store.tasks());
    }

    #[test]
    fn search_is_idempotent() {
        let mut store = seeded();
        store.set_search_term("report");
        let once = store.filtered().to_vec();
        store.set_search_term("report");
        assert_eq!(store.filtered(), once.as_slice());
    }

    #[test]
    fn search_matches_title_and_description_case_insensitive() {
        let mut store = seeded();
        store.set_search_term("MILK");
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].title, "Buy milk");

        store.set_search_term("quarterly");
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].title, "Write report");
    }

    #[test]
    fn status_filter_and_search_compose() {
        let mut store = seeded();
        store
            .add("Buy stamps", "post office run", Status::Done)
            .unwrap();
        store.set_search_term("buy");
        store.set_status_filter(Some(Status::Done));
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].title, "Buy stamps");

        store.set_status_filter(None);
        assert_eq!(store.filtered().len(), 2);
    }

    #[test]
    fn filtered_preserves_authoritative_order() {
        let mut store = seeded();
        store.set_status_filter(Some(Status::ToDo));
        store
            .add("Another todo", "second in line", Status::ToDo)
            .unwrap();
        let titles: Vec<&str> = store.filtered().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Buy milk", "Another todo"]);
    }

    #[test]
    fn add_assigns_sequential_ids_from_one() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk", "desc", Status::ToDo).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].status, Status::ToDo);
    }

    #[test]
    fn add_rejects_blank_title_and_description() {
        let mut store = TaskStore::new();
        let err = store.add("   ", "desc", Status::ToDo).unwrap_err();
        assert!(matches!(err, TasktabError::InvalidTask(_)));
        let err = store.add("title", "\t", Status::ToDo).unwrap_err();
        assert!(matches!(err, TasktabError::InvalidTask(_)));
        assert!(store.tasks().is_empty());
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn add_respects_active_filter() {
        let mut store = TaskStore::new();
        store.set_status_filter(Some(Status::Done));
        store.add("Hidden", "still to do", Status::ToDo).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn remove_is_exact_and_tolerates_unknown_ids() {
        let mut store = seeded();
        store.remove(2);
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3]);

        store.remove(99);
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = seeded();
        store.remove(3);
        let id = store.add("New", "after a delete", Status::ToDo).unwrap();
        assert_eq!(id, 4);
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 2, 4]);
    }

    #[test]
    fn update_replaces_only_the_matching_task() {
        let mut store = seeded();
        store.update(Task {
            id: 3,
            title: "X".to_string(),
            description: "Y".to_string(),
            status: Status::Done,
        });
        assert_eq!(store.tasks()[2].title, "X");
        assert_eq!(store.tasks()[2].description, "Y");
        assert_eq!(store.tasks()[0].title, "Buy milk");
        assert_eq!(store.tasks()[1].title, "Write report");
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut store = seeded();
        let before = store.tasks().to_vec();
        store.update(Task {
            id: 42,
            title: "ghost".to_string(),
            description: "ghost".to_string(),
            status: Status::Done,
        });
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn update_refreshes_the_projection() {
        let mut store = seeded();
        store.set_status_filter(Some(Status::Done));
        assert_eq!(store.filtered().len(), 1);
        store.update(Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: "from the corner shop".to_string(),
            status: Status::Done,
        });
        assert_eq!(store.filtered().len(), 2);
    }

    #[test]
    fn replace_all_reseeds_the_id_counter() {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            Task {
                id: 7,
                title: "loaded".to_string(),
                description: "from remote".to_string(),
                status: Status::Done,
            },
            Task {
                id: 3,
                title: "also loaded".to_string(),
                description: "from remote".to_string(),
                status: Status::ToDo,
            },
        ]);
        let id = store.add("fresh", "client-side", Status::ToDo).unwrap();
        assert_eq!(id, 8);
    }

    #[test]
    fn replace_all_applies_the_current_predicates() {
        let mut store = TaskStore::new();
        store.set_search_term("loaded");
        store.replace_all(vec![
            Task {
                id: 1,
                title: "loaded".to_string(),
                description: "x".to_string(),
                status: Status::ToDo,
            },
            Task {
                id: 2,
                title: "other".to_string(),
                description: "y".to_string(),
                status: Status::ToDo,
            },
        ]);
        assert_eq!(store.filtered().len(), 1);
        assert_eq!(store.filtered()[0].id, 1);
    }
}
