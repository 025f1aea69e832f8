use sauron::prelude::*;
use shared::{Filter, KeyValueStore, Task, TaskCounts, TaskId, TaskStore};
use tracing::{debug, error};

pub mod dropdown;
pub mod storage;
mod view;

use dropdown::{Dropdown, DropdownError, DropdownMsg, DropdownOption};
pub use storage::BrowserStorage;

#[derive(Debug, Clone)]
pub enum Msg {
    // New task input
    SetNewTaskText(String),
    TaskBoxKey(String),
    AddTask,

    // Row actions
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    EditTask(TaskId),
    SetEditText(String),
    SaveEdit(TaskId),
    CancelEdit,
    ClearCompleted,

    // Filter selector
    FilterSelector(DropdownMsg),
    FilterChanged(Filter),
}

#[derive(Clone)]
pub struct Model<S = BrowserStorage> {
    store: TaskStore<S>,
    tasks: Vec<Task>,
    counts: TaskCounts,
    filter: Filter,
    filter_selector: Dropdown<Msg>,
    new_task_text: String,
    editing_task: Option<TaskId>,
    edit_text: String,
}

fn filter_options() -> Vec<DropdownOption> {
    Filter::ALL
        .into_iter()
        .map(|filter| DropdownOption::new(filter.value(), filter.label()))
        .collect()
}

impl<S: KeyValueStore> Model<S> {
    pub fn new(store: TaskStore<S>) -> Result<Self, DropdownError> {
        let filter = Filter::default();
        // Options come from `Filter::ALL`, so every value parses.
        let filter_selector = Dropdown::new(filter_options(), filter.value(), |value| {
            Msg::FilterChanged(value.parse().unwrap_or_default())
        })?;
        let mut model = Self {
            store,
            tasks: Vec::new(),
            counts: TaskCounts::default(),
            filter,
            filter_selector,
            new_task_text: String::new(),
            editing_task: None,
            edit_text: String::new(),
        };
        model.refresh();
        Ok(model)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn counts(&self) -> TaskCounts {
        self.counts
    }

    pub fn editing_task(&self) -> Option<&TaskId> {
        self.editing_task.as_ref()
    }

    pub fn new_task_text(&self) -> &str {
        &self.new_task_text
    }

    /// Applies one message. All work is synchronous, so this is the whole of
    /// `Application::update`.
    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::SetNewTaskText(task_text) => {
                self.new_task_text = task_text;
            }
            Msg::TaskBoxKey(key_name) => {
                if key_name == "Enter" {
                    self.add_task();
                }
            }
            Msg::AddTask => self.add_task(),
            Msg::ToggleTask(task_id) => {
                if let Err(err) = self.store.toggle_done(&task_id) {
                    error!(%err, id = %task_id, "failed to save completion change");
                }
                self.refresh();
            }
            Msg::DeleteTask(task_id) => {
                if let Err(err) = self.store.remove(&task_id) {
                    error!(%err, id = %task_id, "failed to save removal");
                }
                if self.editing_task.as_ref() == Some(&task_id) {
                    self.editing_task = None;
                }
                self.refresh();
            }
            Msg::EditTask(task_id) => {
                if let Some(task) = self.store.get_by_id(&task_id) {
                    self.edit_text = task.text;
                    self.editing_task = Some(task_id);
                } else {
                    debug!(id = %task_id, "edit requested for missing task");
                }
            }
            Msg::SetEditText(task_text) => {
                self.edit_text = task_text;
            }
            Msg::SaveEdit(task_id) => {
                if self.editing_task.as_ref() != Some(&task_id) {
                    return;
                }
                match self.store.update_text(&task_id, self.edit_text.as_str()) {
                    Ok(_) => {
                        self.editing_task = None;
                        self.edit_text.clear();
                    }
                    // Stay in edit mode so the typed text is not lost.
                    Err(err) => error!(%err, id = %task_id, "failed to save edited text"),
                }
                self.refresh();
            }
            Msg::CancelEdit => {
                self.editing_task = None;
                self.edit_text.clear();
            }
            Msg::ClearCompleted => {
                if let Err(err) = self.store.clear_completed() {
                    error!(%err, "failed to clear completed tasks");
                }
                self.refresh();
            }
            Msg::FilterSelector(selector_msg) => {
                if let Some(next) = self.filter_selector.update(selector_msg) {
                    self.apply(next);
                }
            }
            Msg::FilterChanged(filter) => {
                debug!(%filter, "filter changed");
                self.filter = filter;
                self.refresh();
            }
        }
    }

    fn add_task(&mut self) {
        let task_text = self.new_task_text.trim();
        if task_text.is_empty() {
            return;
        }
        match self.store.add(task_text) {
            Ok(task) => {
                debug!(id = %task.id, "task created");
                self.new_task_text.clear();
            }
            Err(err) => error!(%err, "failed to save new task"),
        }
        self.refresh();
    }

    /// Re-reads the visible snapshot from storage.
    fn refresh(&mut self) {
        (self.tasks, self.counts) = self.store.snapshot(self.filter);
    }
}

impl<S: KeyValueStore + Clone + 'static> Application for Model<S> {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        tracing::info!(tasks = self.counts.total, "task list loaded");
        Cmd::none()
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        self.apply(msg);
        Cmd::none()
    }

    fn view(&self) -> Node<Msg> {
        self.view_app()
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("starting taskbox frontend");

    match Model::new(TaskStore::new(BrowserStorage::local())) {
        Ok(model) => {
            Program::mount_to_body(model);
        }
        Err(err) => tracing::error!(%err, "failed to build the task list"),
    }
}
